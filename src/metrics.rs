//! # Metrics
//!
//! Per-generation scores computed by the selection strategies. A `Metrics`
//! record never lives on the individual itself: every assignment pass returns
//! a fresh `Vec<Metrics>` index-aligned with the sequence it scored, so no
//! value can leak from one generation into the next.

/// Scores computed for one individual during one fitness-assignment pass.
///
/// Which fields are meaningful depends on the strategy:
///
/// - rank-crowding fills `pareto_front`, `crowding_distance` and `fitness`
///   (higher fitness is better).
/// - strength-density fills `strength`, `raw_fitness`, `density` and
///   `fitness` (lower fitness is better).
///
/// Untouched fields stay at their zero value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metrics {
    /// Pareto rank, 1 being the non-dominated front.
    pub pareto_front: usize,
    /// Crowding distance within the individual's front, possibly `+inf`.
    pub crowding_distance: f64,
    /// Number of union members this individual dominates.
    pub strength: usize,
    /// Sum of the strengths of this individual's dominators.
    pub raw_fitness: f64,
    /// Inverse k-th nearest neighbour distance, in `(0, 0.5]`.
    pub density: f64,
    /// The scalar the strategy ranks by.
    pub fitness: f64,
}

impl Metrics {
    /// Builds a rank-crowding record, deriving `fitness = 1/front + crowding`.
    pub fn ranked(pareto_front: usize, crowding_distance: f64) -> Self {
        Self {
            pareto_front,
            crowding_distance,
            fitness: 1.0 / pareto_front as f64 + crowding_distance,
            ..Self::default()
        }
    }

    /// Builds a strength-density record, deriving `fitness = raw + density`.
    pub fn scored(strength: usize, raw_fitness: f64, density: f64) -> Self {
        Self {
            strength,
            raw_fitness,
            density,
            fitness: raw_fitness + density,
            ..Self::default()
        }
    }

    /// Whether no scored individual dominates this one.
    pub fn is_non_dominated(&self) -> bool {
        self.raw_fitness == 0.0
    }
}
