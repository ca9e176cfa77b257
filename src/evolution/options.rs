//! # SelectionOptions
//!
//! The `SelectionOptions` struct holds the constants fixed for a whole run:
//! population size, archive capacity, number of objectives, the parallel
//! threshold and the two distance policies.
//!
//! ## Example
//!
//! ```rust
//! use paretosel::evolution::options::{CrowdingScale, DistanceSpace, SelectionOptions};
//!
//! // Create a new SelectionOptions instance with custom parameters
//! let custom_options = SelectionOptions::new(100, 100, 2);
//! assert!(custom_options.validate().is_ok());
//!
//! // Or use the builder
//! let options = SelectionOptions::builder()
//!     .population_size(50)
//!     .archive_capacity(40)
//!     .num_objectives(3)
//!     .crowding_scale(CrowdingScale::Normalized)
//!     .distance_space(DistanceSpace::AllObjectives)
//!     .build();
//! assert_eq!(options.get_num_objectives(), 3);
//! ```
//!
//! ## Policies
//!
//! ### `CrowdingScale`
//!
//! - `Raw`: interior neighbours' differences are summed unscaled, so axes
//!   with larger ranges weigh more.
//! - `Normalized`: each difference is divided by the axis range in the front.
//!
//! ### `DistanceSpace`
//!
//! - `LeadingPair`: Euclidean distance over the first two objectives only.
//! - `AllObjectives`: Euclidean distance over every objective.

use crate::error::{Result, SelectionError};

/// How crowding distance contributions are scaled per objective axis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrowdingScale {
    #[default]
    Raw,
    Normalized,
}

/// Which objectives the strength-density distances are measured over.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceSpace {
    #[default]
    LeadingPair,
    AllObjectives,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOptions {
    population_size: usize,
    archive_capacity: usize,
    num_objectives: usize,
    /// Minimum union size scored in parallel
    parallel_threshold: usize,
    crowding_scale: CrowdingScale,
    distance_space: DistanceSpace,
}

impl SelectionOptions {
    pub fn new(population_size: usize, archive_capacity: usize, num_objectives: usize) -> Self {
        Self {
            population_size,
            archive_capacity,
            num_objectives,
            parallel_threshold: 1000, // Default parallel threshold
            crowding_scale: CrowdingScale::default(),
            distance_space: DistanceSpace::default(),
        }
    }

    /// Checks the constraints every strategy relies on.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::Configuration` if the population size or the
    /// objective count is zero, or if `DistanceSpace::LeadingPair` is used
    /// with fewer than two objectives.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SelectionError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.num_objectives == 0 {
            return Err(SelectionError::Configuration(
                "At least one objective is required".to_string(),
            ));
        }

        if self.distance_space == DistanceSpace::LeadingPair && self.num_objectives < 2 {
            return Err(SelectionError::Configuration(format!(
                "Leading-pair distances need two objectives, got {}",
                self.num_objectives
            )));
        }

        Ok(())
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_archive_capacity(&self) -> usize {
        self.archive_capacity
    }

    pub fn get_num_objectives(&self) -> usize {
        self.num_objectives
    }

    /// Returns the minimum number of individuals scored in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_crowding_scale(&self) -> CrowdingScale {
        self.crowding_scale
    }

    pub fn get_distance_space(&self) -> DistanceSpace {
        self.distance_space
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the archive capacity.
    pub fn set_archive_capacity(&mut self, archive_capacity: usize) {
        self.archive_capacity = archive_capacity;
    }

    /// Sets the number of objectives.
    pub fn set_num_objectives(&mut self, num_objectives: usize) {
        self.num_objectives = num_objectives;
    }

    /// Sets the parallel threshold.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    pub fn set_crowding_scale(&mut self, crowding_scale: CrowdingScale) {
        self.crowding_scale = crowding_scale;
    }

    pub fn set_distance_space(&mut self, distance_space: DistanceSpace) {
        self.distance_space = distance_space;
    }

    /// Returns a builder for creating a `SelectionOptions` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paretosel::evolution::options::SelectionOptions;
    ///
    /// let options = SelectionOptions::builder()
    ///     .population_size(50)
    ///     .archive_capacity(50)
    ///     .num_objectives(2)
    ///     .parallel_threshold(500)
    ///     .build();
    /// assert_eq!(options.get_parallel_threshold(), 500);
    /// ```
    pub fn builder() -> SelectionOptionsBuilder {
        SelectionOptionsBuilder::default()
    }
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            population_size: 100,
            archive_capacity: 100,
            num_objectives: 2,
            parallel_threshold: 1000, // Default parallel threshold
            crowding_scale: CrowdingScale::Raw,
            distance_space: DistanceSpace::LeadingPair,
        }
    }
}

/// Builder for `SelectionOptions`.
///
/// Provides a fluent interface for constructing `SelectionOptions` instances.
#[derive(Debug, Clone, Default)]
pub struct SelectionOptionsBuilder {
    population_size: Option<usize>,
    archive_capacity: Option<usize>,
    num_objectives: Option<usize>,
    parallel_threshold: Option<usize>,
    crowding_scale: Option<CrowdingScale>,
    distance_space: Option<DistanceSpace>,
}

impl SelectionOptionsBuilder {
    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the archive capacity.
    pub fn archive_capacity(mut self, value: usize) -> Self {
        self.archive_capacity = Some(value);
        self
    }

    /// Sets the number of objectives.
    pub fn num_objectives(mut self, value: usize) -> Self {
        self.num_objectives = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn crowding_scale(mut self, value: CrowdingScale) -> Self {
        self.crowding_scale = Some(value);
        self
    }

    pub fn distance_space(mut self, value: DistanceSpace) -> Self {
        self.distance_space = Some(value);
        self
    }

    /// Builds the `SelectionOptions` instance.
    pub fn build(self) -> SelectionOptions {
        let defaults = SelectionOptions::default();
        SelectionOptions {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            archive_capacity: self.archive_capacity.unwrap_or(defaults.archive_capacity),
            num_objectives: self.num_objectives.unwrap_or(defaults.num_objectives),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
            crowding_scale: self.crowding_scale.unwrap_or(defaults.crowding_scale),
            distance_space: self.distance_space.unwrap_or(defaults.distance_space),
        }
    }
}
