use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, SelectionError};
use crate::evolution::options::SelectionOptions;
use crate::individual::Individual;
use crate::metrics::Metrics;
use crate::pareto::distance::{kth_nearest, neighbour_rank, objective_distance};
use crate::selection::archive::{by_fitness, fill, truncate, Archive};
use crate::selection::selection_strategy::{check_sequence, SurvivorSelection};
use crate::selection::state::SelectionState;

/// Scores `population` and `archive` jointly.
///
/// For every member of the union:
///
/// - `strength`: how many other union members it dominates.
/// - `raw_fitness`: the summed strength of everyone dominating it, so 0
///   exactly when nothing in the union dominates it.
/// - `density`: `1 / (2 + d_k)` where `d_k` is the `k`-th smallest distance
///   to the other members and `k = floor(sqrt(|union|))`.
/// - `fitness`: `raw_fitness + density`, lower is better.
///
/// The returned metrics list the population first, then the archive.
/// Dominance and distance rows are computed in parallel once the union
/// reaches the configured parallel threshold.
///
/// # Errors
///
/// Returns `SelectionError::DegenerateNeighborhood` if the union is too small
/// to have a `k`-th nearest neighbour.
pub fn assess<I: Individual>(
    population: &[I],
    archive: &[I],
    options: &SelectionOptions,
) -> Result<Vec<Metrics>> {
    let union: Vec<&I> = population.iter().chain(archive).collect();
    let n = union.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let k = neighbour_rank(n);
    if k + 2 > n {
        return Err(SelectionError::DegenerateNeighborhood {
            k,
            required: k + 2,
            available: n,
        });
    }

    let parallel = n >= options.get_parallel_threshold();
    let space = options.get_distance_space();

    let dominance: Vec<Vec<bool>> = by_row(n, parallel, |p| {
        (0..n)
            .map(|q| p != q && union[p].dominates(union[q]))
            .collect()
    });

    let strength: Vec<usize> = dominance
        .iter()
        .map(|row| row.iter().filter(|&&d| d).count())
        .collect();

    let raw_fitness: Vec<f64> = (0..n)
        .map(|p| {
            (0..n)
                .filter(|&q| dominance[q][p])
                .map(|q| strength[q] as f64)
                .sum()
        })
        .collect();

    let density = by_row(n, parallel, |p| {
        let distances: Vec<f64> = (0..n)
            .filter(|&q| q != p)
            .map(|q| objective_distance(union[p].objectives(), union[q].objectives(), space))
            .collect();
        kth_nearest(distances, k).map(|d| 1.0 / (2.0 + d))
    })
    .into_iter()
    .collect::<Result<Vec<f64>>>()?;

    Ok((0..n)
        .map(|p| Metrics::scored(strength[p], raw_fitness[p], density[p]))
        .collect())
}

fn by_row<T, F>(n: usize, parallel: bool, row: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    if parallel {
        (0..n).into_par_iter().map(row).collect()
    } else {
        (0..n).map(row).collect()
    }
}

fn resolve<'a, I>(pool: &'a [I], archive: &'a [I], index: usize) -> &'a I {
    if index < pool.len() {
        &pool[index]
    } else {
        &archive[index - pool.len()]
    }
}

/// The union index each union member stands for.
///
/// The last selection put archive member `j` into population slot `j` for
/// `j < seeded`. A slot that still holds the same objectives is that member's
/// copy and maps to the member's union index; everything else maps to itself.
fn identities<I: Individual>(pool: &[I], archive: &[I], seeded: usize) -> Vec<usize> {
    let mut identity: Vec<usize> = (0..pool.len() + archive.len()).collect();
    for (slot, (copy, member)) in pool.iter().zip(archive).take(seeded).enumerate() {
        if copy.objectives() == member.objectives() {
            identity[slot] = pool.len() + slot;
        }
    }
    identity
}

/// Union indices chosen by one survivor-selection round.
#[derive(Debug)]
struct Plan {
    archive: Vec<usize>,
    survivors: Vec<usize>,
    metrics: Vec<Metrics>,
}

/// Strength, raw-fitness and density strategy with a bounded archive.
///
/// Fitness is `raw_fitness + density`: lower is better, and any value below 1
/// marks a non-dominated individual. The archive of non-dominated
/// individuals is carried in [`SelectionState`] and scored together with the
/// population every generation.
///
/// # Examples
///
/// ```
/// use paretosel::evolution::options::SelectionOptions;
/// use paretosel::individual::Individual;
/// use paretosel::selection::{SelectionState, StrengthDensitySelection, SurvivorSelection};
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
/// let mut population = vec![P(vec![1.0, 5.0]), P(vec![2.0, 2.0]), P(vec![5.0, 1.0])];
/// let offspring = vec![P(vec![3.0, 3.0]), P(vec![6.0, 6.0]), P(vec![0.5, 7.0])];
///
/// let selection = StrengthDensitySelection::new(SelectionOptions::new(3, 3, 2)).unwrap();
/// let mut state = SelectionState::new();
///
/// selection.select_survivors(&mut population, offspring, &mut state).unwrap();
/// assert_eq!(population.len(), 3);
/// assert_eq!(state.archive().len(), 3);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthDensitySelection {
    options: SelectionOptions,
}

impl StrengthDensitySelection {
    /// Creates the strategy after validating `options`.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::Configuration` if `options` fail
    /// [`SelectionOptions::validate`], if the archive capacity is 1 (an
    /// archive cannot be truncated to a single member by nearest-neighbour
    /// distance), or if the population has fewer than 3 individuals (too few
    /// for a `k`-th nearest neighbour).
    pub fn new(options: SelectionOptions) -> Result<Self> {
        options.validate()?;

        if options.get_archive_capacity() == 1 {
            return Err(SelectionError::Configuration(
                "Archive capacity must be 0 or at least 2".to_string(),
            ));
        }

        if options.get_population_size() < 3 {
            return Err(SelectionError::Configuration(format!(
                "Strength-density selection needs a population of at least 3, got {}",
                options.get_population_size()
            )));
        }

        Ok(Self { options })
    }

    fn plan<I: Individual>(&self, pool: &[I], archive: &Archive<I>, seeded: usize) -> Result<Plan> {
        let n = self.options.get_population_size();
        let capacity = self.options.get_archive_capacity();
        let metrics = assess(pool, archive.members(), &self.options)?;
        let pool_len = pool.len();
        let identity = identities(pool, archive.members(), seeded);

        // Previous archive first, then every pool member that is not a copy of it.
        let mut members: Vec<usize> = (pool_len..metrics.len())
            .chain((0..pool_len).filter(|&i| identity[i] == i))
            .filter(|&i| metrics[i].is_non_dominated())
            .collect();
        let candidates = members.len();

        match candidates.cmp(&capacity) {
            Ordering::Greater => {
                let objectives: Vec<&[f64]> = pool
                    .iter()
                    .chain(archive.members())
                    .map(|i| i.objectives())
                    .collect();
                let removed = truncate(
                    &objectives,
                    &mut members,
                    capacity,
                    self.options.get_distance_space(),
                )?;
                debug!(candidates, removed, capacity, "truncated archive");
            }
            Ordering::Less => {
                let added = fill(&mut members, &metrics[..pool_len], capacity);
                debug!(candidates, added, capacity, "filled archive with dominated individuals");
            }
            Ordering::Equal => {}
        }

        let mut taken = vec![false; metrics.len()];
        let mut survivors: Vec<usize> = Vec::with_capacity(n);
        for &i in members.iter().take(n) {
            taken[identity[i]] = true;
            survivors.push(i);
        }

        if survivors.len() < n {
            let missing = n - survivors.len();
            for i in by_fitness(&metrics[..pool_len]) {
                if survivors.len() == n {
                    break;
                }
                if !taken[identity[i]] {
                    taken[identity[i]] = true;
                    survivors.push(i);
                }
            }
            debug!(
                archive = members.len(),
                backfilled = missing,
                "archive smaller than population, back-filled from pool"
            );
        }

        Ok(Plan {
            archive: members,
            survivors,
            metrics,
        })
    }
}

impl<I> SurvivorSelection<I> for StrengthDensitySelection
where
    I: Individual,
{
    fn options(&self) -> &SelectionOptions {
        &self.options
    }

    fn higher_is_better(&self) -> bool {
        false
    }

    fn assign_fitness(
        &self,
        population: &[I],
        state: &mut SelectionState<I>,
    ) -> Result<Vec<Metrics>> {
        check_sequence(&self.options, population, "population")?;

        let mut metrics = assess(population, state.archive().members(), &self.options)?;
        let archive_metrics = metrics.split_off(population.len());
        state.archive_mut().set_metrics(archive_metrics);

        debug!(
            population = population.len(),
            archive = state.archive().len(),
            non_dominated = metrics.iter().filter(|m| m.is_non_dominated()).count(),
            "assigned strength-density fitness"
        );
        Ok(metrics)
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
        let mut pool = std::mem::take(population);
        pool.extend(offspring);

        let plan = match self.plan(&pool, state.archive(), state.seeded()) {
            Ok(plan) => plan,
            Err(e) => {
                pool.truncate(size);
                *population = pool;
                return Err(e);
            }
        };

        let previous = state.archive().members();
        let members: Vec<I> = plan
            .archive
            .iter()
            .map(|&i| resolve(&pool, previous, i).clone())
            .collect();
        let survivors: Vec<I> = plan
            .survivors
            .iter()
            .map(|&i| resolve(&pool, previous, i).clone())
            .collect();

        let member_metrics = plan.archive.iter().map(|&i| plan.metrics[i]).collect();
        let survivor_metrics = plan.survivors.iter().map(|&i| plan.metrics[i]).collect();

        let seeded = plan.archive.len().min(size);
        state.archive_mut().replace(members, member_metrics);
        state.set_seeded(seeded);
        state.advance();
        *population = survivors;

        debug!(
            generation = state.generation(),
            archive = state.archive().len(),
            survivors = population.len(),
            "strength-density survivor selection done"
        );
        Ok(survivor_metrics)
    }
}
