//! Objective-space distances used by the strength-density density estimate
//! and by archive truncation.

use crate::error::{Result, SelectionError};
use crate::evolution::options::DistanceSpace;

/// Euclidean distance between two objective vectors.
///
/// `DistanceSpace::LeadingPair` only looks at the first two objectives.
pub fn objective_distance(a: &[f64], b: &[f64], space: DistanceSpace) -> f64 {
    let dims = match space {
        DistanceSpace::LeadingPair => 2,
        DistanceSpace::AllObjectives => a.len(),
    };
    a.iter()
        .zip(b.iter())
        .take(dims)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// The neighbour rank `k = floor(sqrt(count))`.
pub fn neighbour_rank(count: usize) -> usize {
    (count as f64).sqrt().floor() as usize
}

/// The `k`-th smallest (0-indexed) of `distances`.
///
/// `distances` holds one individual's distances to every *other* member of
/// the set, so a set of `n` members yields `n - 1` entries.
///
/// # Errors
///
/// Returns `SelectionError::DegenerateNeighborhood` if fewer than `k + 1`
/// distances are available.
pub fn kth_nearest(mut distances: Vec<f64>, k: usize) -> Result<f64> {
    if k >= distances.len() {
        return Err(SelectionError::DegenerateNeighborhood {
            k,
            required: k + 2,
            available: distances.len() + 1,
        });
    }
    let (_, kth, _) = distances.select_nth_unstable_by(k, f64::total_cmp);
    Ok(*kth)
}
