//! Pareto ranking building blocks shared by both selection strategies.
//!
//! - [`sort::non_dominated_sort`]: fast non-dominated sorting into ranked fronts.
//! - [`crowding::crowding_distance`]: per-front diversity scores.
//! - [`distance`]: objective-space distances and k-th nearest neighbours.
pub mod crowding;
pub mod distance;
pub mod sort;

pub use crowding::crowding_distance;
pub use distance::{kth_nearest, neighbour_rank, objective_distance};
pub use sort::{non_dominated_sort, Fronts};
