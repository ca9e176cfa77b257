//! # Archive
//!
//! The bounded elite set carried across generations by the strength-density
//! strategy, and the two maintenance steps applied to it every generation:
//!
//! - [`fill`]: top an under-full archive up with the best dominated
//!   individuals of the pool.
//! - [`truncate`]: shrink an over-full archive one member at a time, always
//!   dropping the member whose neighbourhood is most crowded.
//!
//! Both steps work on indices into the scored union so the archive is only
//! materialised once the final membership is known.

use std::cmp::Ordering;

use tracing::trace;

use crate::error::{OptionExt, Result, SelectionError};
use crate::evolution::options::DistanceSpace;
use crate::metrics::Metrics;
use crate::pareto::distance::{neighbour_rank, objective_distance};

/// Archive members and the metrics they received in their latest scoring.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Archive<I> {
    members: Vec<I>,
    metrics: Vec<Metrics>,
}

impl<I> Archive<I> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            metrics: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[I] {
        &self.members
    }

    /// Metrics aligned with [`Archive::members`].
    pub fn metrics(&self) -> &[Metrics] {
        &self.metrics
    }

    pub fn iter(&self) -> impl Iterator<Item = (&I, &Metrics)> {
        self.members.iter().zip(self.metrics.iter())
    }

    pub fn into_members(self) -> Vec<I> {
        self.members
    }

    pub(crate) fn replace(&mut self, members: Vec<I>, metrics: Vec<Metrics>) {
        debug_assert_eq!(members.len(), metrics.len());
        self.members = members;
        self.metrics = metrics;
    }

    pub(crate) fn set_metrics(&mut self, metrics: Vec<Metrics>) {
        debug_assert_eq!(self.members.len(), metrics.len());
        self.metrics = metrics;
    }
}

impl<I> Default for Archive<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Indices of `metrics` sorted by ascending fitness, stable on ties.
pub(crate) fn by_fitness(metrics: &[Metrics]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..metrics.len()).collect();
    order.sort_by(|&a, &b| metrics[a].fitness.total_cmp(&metrics[b].fitness));
    order
}

/// Appends dominated pool members, best fitness first, until `members`
/// reaches `capacity` or the pool runs out. Returns how many were added.
///
/// `pool` holds the metrics of the pool; pushed values are pool indices.
pub fn fill(members: &mut Vec<usize>, pool: &[Metrics], capacity: usize) -> usize {
    let before = members.len();
    let missing = capacity.saturating_sub(before);
    let dominated = by_fitness(pool)
        .into_iter()
        .filter(|&i| !pool[i].is_non_dominated());
    members.extend(dominated.take(missing));
    members.len() - before
}

/// Removes members until at most `capacity` remain. Returns the number removed.
///
/// Each round uses `k = floor(sqrt(size))`. For every member the distances to
/// the other members are sorted ascending and the `k`-th one is its
/// representative distance. The member with the smallest representative
/// distance goes; ties are settled on the distances past `k`, then on the
/// closer ones, then by position.
///
/// `objectives[i]` is the objective vector of union index `i`; `members`
/// holds union indices.
///
/// # Errors
///
/// Returns `SelectionError::DegenerateNeighborhood` when the archive is too
/// small for its `k`-th neighbour, which only happens when shrinking two
/// members to one.
pub fn truncate(
    objectives: &[&[f64]],
    members: &mut Vec<usize>,
    capacity: usize,
    space: DistanceSpace,
) -> Result<usize> {
    if capacity == 0 {
        let removed = members.len();
        members.clear();
        return Ok(removed);
    }

    let mut removed = 0;
    while members.len() > capacity {
        let size = members.len();
        let k = neighbour_rank(size);
        if k + 2 > size {
            return Err(SelectionError::DegenerateNeighborhood {
                k,
                required: k + 2,
                available: size,
            });
        }

        let neighbourhoods: Vec<Vec<f64>> = members
            .iter()
            .enumerate()
            .map(|(p, &a)| {
                let mut row: Vec<f64> = members
                    .iter()
                    .enumerate()
                    .filter(|&(q, _)| q != p)
                    .map(|(_, &b)| objective_distance(objectives[a], objectives[b], space))
                    .collect();
                row.sort_by(f64::total_cmp);
                row
            })
            .collect();

        let victim = (0..size)
            .min_by(|&a, &b| compare_neighbourhoods(&neighbourhoods[a], &neighbourhoods[b], k))
            .ok_or_else_selection(|| {
                SelectionError::Other("Cannot truncate an empty archive".to_string())
            })?;

        trace!(
            position = victim,
            distance = neighbourhoods[victim][k],
            size,
            "removing most crowded archive member"
        );
        members.remove(victim);
        removed += 1;
    }

    Ok(removed)
}

fn compare_neighbourhoods(a: &[f64], b: &[f64], k: usize) -> Ordering {
    let beyond = a[k..].iter().zip(&b[k..]);
    let closer = a[..k].iter().zip(&b[..k]);
    beyond
        .chain(closer)
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}
