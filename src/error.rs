//! # Error Types
//!
//! This module defines the error type shared by every fitness-assignment and
//! survivor-selection operation in the crate. Preconditions are checked before
//! any computation starts, so an `Err` never comes with a half-written
//! population.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use paretosel::error::{Result, SelectionError};
//!
//! fn check_size(len: usize, expected: usize) -> Result<()> {
//!     if len != expected {
//!         return Err(SelectionError::SizeMismatch {
//!             what: "population",
//!             expected,
//!             actual: len,
//!         });
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_size(4, 4).is_ok());
//! assert!(check_size(3, 4).is_err());
//! ```
//!
//! Using the `ResultExt` trait to add context to a collaborator's error:
//!
//! ```rust
//! use paretosel::error::{Result, ResultExt};
//!
//! fn parse_weight(raw: &str) -> Result<f64> {
//!     raw.parse::<f64>().context("Failed to parse objective weight")
//! }
//!
//! assert!(parse_weight("0.5").is_ok());
//! assert!(parse_weight("heavy").is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use paretosel::error::{OptionExt, SelectionError};
//!
//! fn first_front(fronts: &[Vec<usize>]) -> paretosel::error::Result<&Vec<usize>> {
//!     fronts.first().ok_or_else_selection(|| SelectionError::EmptyPopulation)
//! }
//!
//! assert!(first_front(&[]).is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while assigning fitness or selecting survivors.
#[derive(Error, Debug)]
pub enum SelectionError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A sequence did not have the length fixed by the configuration.
    #[error("Size mismatch: {what} has {actual} individuals, expected {expected}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An individual exposed an objective vector of the wrong length.
    #[error("Objective length mismatch: individual {index} has {actual} objectives, expected {expected}")]
    ObjectiveLength {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Error that occurs when NaN or infinity values are encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// A k-th nearest neighbour was requested from too few individuals.
    #[error("Degenerate neighbourhood: the {k}-th nearest neighbour needs at least {required} individuals, got {available}")]
    DegenerateNeighborhood {
        k: usize,
        required: usize,
        available: usize,
    },

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for selection operations.
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Extension trait for Result to add context to errors.
///
/// This trait provides a convenient way to add context to errors raised by
/// external collaborators when converting them to `SelectionError`.
pub trait ResultExt<T, E> {
    /// Adds context to an error.
    ///
    /// ## Arguments
    ///
    /// * `context` - A string providing context for the error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| SelectionError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, SelectionError>` using
    /// a closure to generate the error.
    fn ok_or_else_selection<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SelectionError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_selection<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SelectionError,
    {
        self.ok_or_else(err_fn)
    }
}
