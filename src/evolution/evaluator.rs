use std::error::Error as StdError;

use crate::individual::Individual;

/// Refreshes the objective vectors of a batch of individuals.
///
/// This is the caller's side of the boundary: genome decoding and objective
/// computation happen here, before any fitness is assigned. Failures are
/// propagated untouched apart from added context; nothing is retried.
pub trait ObjectiveEvaluator<I: Individual> {
    type Error: StdError + Send + Sync + 'static;

    fn evaluate(&self, individuals: &mut [I]) -> Result<(), Self::Error>;
}
