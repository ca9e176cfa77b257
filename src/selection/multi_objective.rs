use crate::error::Result;
use crate::evolution::options::SelectionOptions;
use crate::individual::Individual;
use crate::metrics::Metrics;
use crate::selection::rank_crowding::RankCrowdingSelection;
use crate::selection::selection_strategy::SurvivorSelection;
use crate::selection::state::SelectionState;
use crate::selection::strength_density::StrengthDensitySelection;

/// Which multi-objective strategy to build.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// Pareto rank plus crowding distance. Higher fitness is better.
    #[default]
    RankCrowding,
    /// Strength, raw fitness and density with a bounded archive. Lower
    /// fitness is better.
    StrengthDensity,
}

/// One of the two strategies, chosen once at construction.
///
/// # Examples
///
/// ```
/// use paretosel::evolution::options::SelectionOptions;
/// use paretosel::selection::{MultiObjectiveStrategy, StrategyKind};
///
/// let options = SelectionOptions::new(20, 20, 2);
/// let strategy = MultiObjectiveStrategy::new(StrategyKind::StrengthDensity, options).unwrap();
/// assert_eq!(strategy.kind(), StrategyKind::StrengthDensity);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum MultiObjectiveStrategy {
    RankCrowding(RankCrowdingSelection),
    StrengthDensity(StrengthDensitySelection),
}

impl MultiObjectiveStrategy {
    /// Builds the strategy named by `kind`.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::Configuration` if `options` are invalid for
    /// the chosen strategy.
    pub fn new(kind: StrategyKind, options: SelectionOptions) -> Result<Self> {
        Ok(match kind {
            StrategyKind::RankCrowding => Self::RankCrowding(RankCrowdingSelection::new(options)?),
            StrategyKind::StrengthDensity => {
                Self::StrengthDensity(StrengthDensitySelection::new(options)?)
            }
        })
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::RankCrowding(_) => StrategyKind::RankCrowding,
            Self::StrengthDensity(_) => StrategyKind::StrengthDensity,
        }
    }
}

impl<I> SurvivorSelection<I> for MultiObjectiveStrategy
where
    I: Individual,
{
    fn options(&self) -> &SelectionOptions {
        match self {
            Self::RankCrowding(s) => SurvivorSelection::<I>::options(s),
            Self::StrengthDensity(s) => SurvivorSelection::<I>::options(s),
        }
    }

    fn higher_is_better(&self) -> bool {
        match self {
            Self::RankCrowding(s) => SurvivorSelection::<I>::higher_is_better(s),
            Self::StrengthDensity(s) => SurvivorSelection::<I>::higher_is_better(s),
        }
    }

    fn assign_fitness(
        &self,
        population: &[I],
        state: &mut SelectionState<I>,
    ) -> Result<Vec<Metrics>> {
        match self {
            Self::RankCrowding(s) => s.assign_fitness(population, state),
            Self::StrengthDensity(s) => s.assign_fitness(population, state),
        }
    }

    fn select_survivors(
        &self,
        population: &mut Vec<I>,
        offspring: Vec<I>,
        state: &mut SelectionState<I>,
    ) -> Result<Vec<Metrics>> {
        match self {
            Self::RankCrowding(s) => s.select_survivors(population, offspring, state),
            Self::StrengthDensity(s) => s.select_survivors(population, offspring, state),
        }
    }
}
