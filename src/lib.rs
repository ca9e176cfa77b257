pub mod error;
pub mod evolution;
pub mod individual;
pub mod metrics;
pub mod pareto;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{OptionExt, Result, ResultExt, SelectionError};
pub use evolution::{ObjectiveEvaluator, SelectionOptions};
pub use individual::Individual;
pub use metrics::Metrics;
pub use selection::{MultiObjectiveStrategy, SelectionState, StrategyKind, SurvivorSelection};
