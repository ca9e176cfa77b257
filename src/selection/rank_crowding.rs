use tracing::debug;

use crate::error::{OptionExt, Result, SelectionError};
use crate::evolution::options::SelectionOptions;
use crate::individual::Individual;
use crate::metrics::Metrics;
use crate::pareto::{crowding_distance, non_dominated_sort};
use crate::selection::selection_strategy::{check_sequence, SurvivorSelection};
use crate::selection::state::SelectionState;

/// Pareto-rank and crowding-distance strategy.
///
/// Fitness is `1 / pareto_front + crowding_distance`, so a better front and a
/// lonelier position both raise it: higher is better. Survivor selection is
/// elitist: population and offspring compete together, whole fronts are kept
/// in rank order and the front that no longer fits is thinned by crowding
/// distance.
///
/// # Examples
///
/// ```
/// use paretosel::evolution::options::SelectionOptions;
/// use paretosel::individual::Individual;
/// use paretosel::selection::{RankCrowdingSelection, SelectionState, SurvivorSelection};
///
/// #[derive(Clone, Debug)]
/// struct P(Vec<f64>);
///
/// impl Individual for P {
///     fn objectives(&self) -> &[f64] {
///         &self.0
///     }
/// }
///
/// let population = vec![
///     P(vec![1.0, 4.0]),
///     P(vec![2.0, 3.0]),
///     P(vec![3.0, 2.0]),
///     P(vec![4.0, 1.0]),
///     P(vec![5.0, 5.0]),
/// ];
///
/// let selection = RankCrowdingSelection::new(SelectionOptions::new(5, 0, 2)).unwrap();
/// let metrics = selection
///     .assign_fitness(&population, &mut SelectionState::new())
///     .unwrap();
///
/// assert_eq!(metrics[4].pareto_front, 2);
/// assert!(metrics[4].crowding_distance.is_infinite());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RankCrowdingSelection {
    options: SelectionOptions,
}

impl RankCrowdingSelection {
    /// Creates the strategy after validating `options`.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::Configuration` if `options` fail
    /// [`SelectionOptions::validate`].
    pub fn new(options: SelectionOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Ranks `individuals` into fronts and scores every front on its own.
    fn rank<I: Individual>(&self, individuals: &[I]) -> Result<Vec<Metrics>> {
        let fronts = non_dominated_sort(individuals)?;
        let mut metrics = vec![Metrics::default(); individuals.len()];

        for (r, front) in fronts.fronts().iter().enumerate() {
            let distances = crowding_distance(individuals, front, self.options.get_crowding_scale());
            for (&i, distance) in front.iter().zip(distances) {
                metrics[i] = Metrics::ranked(r + 1, distance);
            }
        }

        debug!(
            individuals = individuals.len(),
            fronts = fronts.len(),
            first_front = fronts.fronts().first().map_or(0, Vec::len),
            "assigned rank-crowding fitness"
        );
        Ok(metrics)
    }

    /// Picks the survivors among `union`, returning union indices and their metrics.
    fn survivors<I: Individual>(&self, union: &[I]) -> Result<Vec<(usize, Metrics)>> {
        let target = self.options.get_population_size();
        let fronts = non_dominated_sort(union)?;
        let mut chosen: Vec<(usize, Metrics)> = Vec::with_capacity(target);

        for (r, front) in fronts.fronts().iter().enumerate() {
            let remaining = target - chosen.len();
            if remaining == 0 {
                break;
            }

            let distances = crowding_distance(union, front, self.options.get_crowding_scale());
            let mut members: Vec<(usize, f64)> = front.iter().copied().zip(distances).collect();

            if members.len() > remaining {
                members.sort_by(|a, b| b.1.total_cmp(&a.1));
                members.truncate(remaining);
                debug!(
                    front = r + 1,
                    size = front.len(),
                    kept = remaining,
                    "thinned boundary front by crowding distance"
                );
            }

            chosen.extend(
                members
                    .into_iter()
                    .map(|(i, distance)| (i, Metrics::ranked(r + 1, distance))),
            );
        }

        Ok(chosen)
    }
}

impl<I> SurvivorSelection<I> for RankCrowdingSelection
where
    I: Individual,
{
    fn options(&self) -> &SelectionOptions {
        &self.options
    }

    fn higher_is_better(&self) -> bool {
        true
    }

    fn assign_fitness(
        &self,
        population: &[I],
        _state: &mut SelectionState<I>,
    ) -> Result<Vec<Metrics>> {
        check_sequence(&self.options, population, "population")?;
        self.rank(population)
    }

    fn select_survivors(
        &self,
        population: &mut Vec<I>,
        offspring: Vec<I>,
        state: &mut SelectionState<I>,
    ) -> Result<Vec<Metrics>> {
        check_sequence(&self.options, population, "population")?;
        check_sequence(&self.options, &offspring, "offspring")?;

        let size = population.len();
        let mut union = std::mem::take(population);
        union.extend(offspring);

        let chosen = match self.survivors(&union) {
            Ok(chosen) => chosen,
            Err(e) => {
                union.truncate(size);
                *population = union;
                return Err(e);
            }
        };

        let mut slots: Vec<Option<I>> = union.into_iter().map(Some).collect();
        let mut metrics = Vec::with_capacity(chosen.len());
        for (i, m) in chosen {
            let survivor = slots[i].take().ok_or_else_selection(|| {
                SelectionError::Other(format!("Individual {} selected twice", i))
            })?;
            population.push(survivor);
            metrics.push(m);
        }

        state.advance();
        debug!(
            generation = state.generation(),
            survivors = population.len(),
            "rank-crowding survivor selection done"
        );
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::options::CrowdingScale;
    use crate::individual::testing::{points, Point};

    fn selection(n: usize) -> RankCrowdingSelection {
        RankCrowdingSelection::new(SelectionOptions::new(n, 0, 2)).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_options() {
        assert!(RankCrowdingSelection::new(SelectionOptions::new(0, 0, 2)).is_err());
    }

    #[test]
    fn test_mutually_non_dominated_share_front() {
        let pop = points(&[[1.0, 4.0], [2.0, 3.0], [3.0, 2.0], [4.0, 1.0]]);
        let metrics = selection(4)
            .assign_fitness(&pop, &mut SelectionState::new())
            .unwrap();
        for m in &metrics {
            assert_eq!(m.pareto_front, 1);
        }
        // Boundaries on both axes are 0 and 3; 1 and 2 are interior.
        assert!(metrics[0].crowding_distance.is_infinite());
        assert!(metrics[3].crowding_distance.is_infinite());
        assert_eq!(metrics[1].crowding_distance, 4.0);
        assert_eq!(metrics[2].crowding_distance, 4.0);
        assert_eq!(metrics[1].fitness, 5.0);
    }

    #[test]
    fn test_dominated_singleton_front() {
        let pop = points(&[[1.0, 4.0], [2.0, 3.0], [3.0, 2.0], [4.0, 1.0], [5.0, 5.0]]);
        let metrics = selection(5)
            .assign_fitness(&pop, &mut SelectionState::new())
            .unwrap();
        assert_eq!(metrics[4].pareto_front, 2);
        assert!(metrics[4].crowding_distance.is_infinite());
        assert!(metrics[4].fitness.is_infinite());
    }

    #[test]
    fn test_assign_fitness_is_idempotent() {
        let pop = points(&[[0.3, 0.8], [0.5, 0.5], [0.9, 0.1], [0.6, 0.7], [0.2, 0.95], [0.8, 0.9]]);
        let s = selection(6);
        let mut state = SelectionState::new();
        let first = s.assign_fitness(&pop, &mut state).unwrap();
        let second = s.assign_fitness(&pop, &mut state).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_assign_fitness_checks_sizes() {
        let pop = points(&[[1.0, 2.0], [2.0, 1.0]]);
        assert!(matches!(
            selection(3).assign_fitness(&pop, &mut SelectionState::new()),
            Err(SelectionError::SizeMismatch { .. })
        ));
        assert!(matches!(
            selection(3).assign_fitness(&[], &mut SelectionState::<Point>::new()),
            Err(SelectionError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_select_keeps_whole_better_fronts() {
        let mut pop = points(&[[5.0, 5.0], [6.0, 6.0], [1.0, 4.0]]);
        let offspring = points(&[[4.0, 1.0], [7.0, 7.0], [2.5, 2.5]]);
        let mut state = SelectionState::new();
        let metrics = selection(3)
            .select_survivors(&mut pop, offspring, &mut state)
            .unwrap();

        assert_eq!(pop.len(), 3);
        assert_eq!(
            pop,
            points(&[[1.0, 4.0], [4.0, 1.0], [2.5, 2.5]])
        );
        assert!(metrics.iter().all(|m| m.pareto_front == 1));
        assert_eq!(state.generation(), 1);
    }

    #[test]
    fn test_select_thins_boundary_front_by_crowding() {
        // Front 1 has five members, only three slots.
        let mut pop = points(&[[0.0, 10.0], [1.0, 9.0], [5.0, 5.0]]);
        let offspring = points(&[[9.0, 1.0], [10.0, 0.0], [20.0, 20.0]]);
        let metrics = selection(3)
            .select_survivors(&mut pop, offspring, &mut SelectionState::new())
            .unwrap();

        // (0, 10) and (10, 0) are boundaries; (5, 5) has the widest gap.
        assert_eq!(pop, points(&[[0.0, 10.0], [10.0, 0.0], [5.0, 5.0]]));
        assert!(metrics[0].crowding_distance.is_infinite());
        assert!(metrics[1].crowding_distance.is_infinite());
        assert_eq!(metrics[2].crowding_distance, 16.0);
        assert_eq!(metrics[2].fitness, 17.0);
    }

    #[test]
    fn test_select_crosses_front_boundary() {
        let mut pop = points(&[[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]]);
        let offspring = points(&[[1.5, 2.5], [2.5, 1.5], [9.0, 9.0], [8.0, 8.0]]);
        let metrics = selection(4)
            .select_survivors(&mut pop, offspring, &mut SelectionState::new())
            .unwrap();

        assert_eq!(pop.len(), 4);
        assert_eq!(pop[0], Point::new(&[1.0, 1.0]));
        assert_eq!(metrics[0].pareto_front, 1);
        // Front 2 = {(2,2), (1.5,2.5), (2.5,1.5)} fits entirely.
        assert!(metrics[1..].iter().all(|m| m.pareto_front == 2));
        assert!(!pop.contains(&Point::new(&[9.0, 9.0])));
    }

    #[test]
    fn test_select_identical_population() {
        let mut pop = vec![Point::new(&[2.0, 2.0]); 4];
        let offspring = vec![Point::new(&[2.0, 2.0]); 4];
        let metrics = selection(4)
            .select_survivors(&mut pop, offspring, &mut SelectionState::new())
            .unwrap();
        assert_eq!(pop.len(), 4);
        assert!(metrics.iter().all(|m| m.pareto_front == 1));
        // Boundaries of the 8-member front sort first.
        assert!(metrics[0].crowding_distance.is_infinite());
        assert!(metrics[1].crowding_distance.is_infinite());
        assert_eq!(metrics[2].crowding_distance, 0.0);
    }

    #[test]
    fn test_select_rejects_mismatched_offspring() {
        let original = points(&[[1.0, 2.0], [2.0, 1.0]]);
        let mut pop = original.clone();
        let offspring = points(&[[0.5, 0.5]]);
        let result = selection(2).select_survivors(&mut pop, offspring, &mut SelectionState::new());
        assert!(matches!(
            result,
            Err(SelectionError::SizeMismatch { what: "offspring", .. })
        ));
        assert_eq!(pop, original);
    }

    #[test]
    fn test_normalized_scale_is_used() {
        let options = SelectionOptions::builder()
            .population_size(3)
            .crowding_scale(CrowdingScale::Normalized)
            .build();
        let s = RankCrowdingSelection::new(options).unwrap();
        let pop = points(&[[0.0, 100.0], [1.0, 50.0], [2.0, 0.0]]);
        let metrics = s.assign_fitness(&pop, &mut SelectionState::new()).unwrap();
        assert_eq!(metrics[1].crowding_distance, 2.0);
    }
}
