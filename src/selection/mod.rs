pub mod archive;
pub mod multi_objective;
pub mod rank_crowding;
pub mod selection_strategy;
pub mod state;
pub mod strength_density;

pub use archive::Archive;
pub use multi_objective::{MultiObjectiveStrategy, StrategyKind};
pub use rank_crowding::RankCrowdingSelection;
pub use selection_strategy::SurvivorSelection;
pub use state::SelectionState;
pub use strength_density::{assess, StrengthDensitySelection};
