use std::fmt::Debug;

use crate::error::{Result, ResultExt, SelectionError};
use crate::evolution::evaluator::ObjectiveEvaluator;
use crate::evolution::options::SelectionOptions;
use crate::individual::{validate_objectives, Individual};
use crate::metrics::Metrics;
use crate::selection::state::SelectionState;

/// Trait for multi-objective fitness-assignment and survivor-selection strategies.
///
/// A strategy scores a population into one [`Metrics`] record per individual
/// and, once per generation, merges the population with its offspring and
/// keeps exactly `population_size` survivors. Anything a strategy needs to
/// remember between generations lives in the caller-owned [`SelectionState`].
///
/// # Examples
///
/// ```
/// use paretosel::evolution::options::SelectionOptions;
/// use paretosel::individual::Individual;
/// use paretosel::selection::{RankCrowdingSelection, SelectionState, SurvivorSelection};
/// use paretosel::error::Result;
///
/// #[derive(Clone, Debug)]
/// struct Design {
///     objectives: Vec<f64>,
/// }
///
/// impl Individual for Design {
///     fn objectives(&self) -> &[f64] {
///         &self.objectives
///     }
/// }
///
/// fn main() -> Result<()> {
///     let design = |a: f64, b: f64| Design { objectives: vec![a, b] };
///     let mut population = vec![design(1.0, 4.0), design(2.0, 3.0), design(5.0, 5.0)];
///     let offspring = vec![design(0.5, 6.0), design(3.0, 1.0), design(6.0, 6.0)];
///
///     let selection = RankCrowdingSelection::new(SelectionOptions::new(3, 0, 2))?;
///     let mut state = SelectionState::new();
///
///     let fitness = selection.assign_fitness(&population, &mut state)?;
///     assert_eq!(fitness.len(), 3);
///
///     selection.select_survivors(&mut population, offspring, &mut state)?;
///     assert_eq!(population.len(), 3);
///
///     Ok(())
/// }
/// ```
pub trait SurvivorSelection<I>: Debug + Send + Sync
where
    I: Individual,
{
    /// The run constants this strategy was built with.
    fn options(&self) -> &SelectionOptions;

    /// Whether a larger `Metrics::fitness` marks a better individual.
    fn higher_is_better(&self) -> bool;

    /// Scores every individual of `population`.
    ///
    /// # Returns
    ///
    /// One fresh `Metrics` per individual, index-aligned with `population`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty or its length differs from `population_size`
    /// - An objective vector has the wrong length or a non-finite value
    /// - The strategy cannot compute its neighbourhood statistics
    fn assign_fitness(
        &self,
        population: &[I],
        state: &mut SelectionState<I>,
    ) -> Result<Vec<Metrics>>;

    /// Replaces `population` with exactly `population_size` survivors drawn
    /// from the population, the offspring and whatever `state` carries.
    ///
    /// # Returns
    ///
    /// The metrics of the survivors, index-aligned with the new population.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SurvivorSelection::assign_fitness`], applied to
    /// both sequences. On error the population is left as it was.
    fn select_survivors(
        &self,
        population: &mut Vec<I>,
        offspring: Vec<I>,
        state: &mut SelectionState<I>,
    ) -> Result<Vec<Metrics>>;

    /// Refreshes the objectives through `evaluator`, then assigns fitness.
    fn evaluate_and_assign<E>(
        &self,
        evaluator: &E,
        population: &mut [I],
        state: &mut SelectionState<I>,
    ) -> Result<Vec<Metrics>>
    where
        E: ObjectiveEvaluator<I>,
        Self: Sized,
    {
        evaluator
            .evaluate(population)
            .context("Objective evaluation failed")?;
        self.assign_fitness(population, state)
    }
}

/// Checks one sequence against the run constants before anything is computed.
pub(crate) fn check_sequence<I: Individual>(
    options: &SelectionOptions,
    individuals: &[I],
    what: &'static str,
) -> Result<()> {
    if individuals.is_empty() {
        return Err(SelectionError::EmptyPopulation);
    }

    if individuals.len() != options.get_population_size() {
        return Err(SelectionError::SizeMismatch {
            what,
            expected: options.get_population_size(),
            actual: individuals.len(),
        });
    }

    validate_objectives(individuals, options.get_num_objectives())
}
