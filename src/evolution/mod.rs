pub mod evaluator;
pub mod options;

pub use evaluator::ObjectiveEvaluator;
pub use options::{CrowdingScale, DistanceSpace, SelectionOptions, SelectionOptionsBuilder};
