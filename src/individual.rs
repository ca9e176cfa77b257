//! # Individual Trait
//!
//! The `Individual` trait is the boundary between this crate and the
//! evolutionary loop that owns the candidates. An individual exposes its
//! already-evaluated objective vector and decides Pareto dominance against
//! another individual of the same type.
//!
//! ## Example
//!
//! ```rust
//! use paretosel::individual::Individual;
//!
//! #[derive(Clone, Debug)]
//! struct Design {
//!     objectives: Vec<f64>,
//! }
//!
//! impl Individual for Design {
//!     fn objectives(&self) -> &[f64] {
//!         &self.objectives
//!     }
//! }
//!
//! let a = Design { objectives: vec![1.0, 2.0] };
//! let b = Design { objectives: vec![2.0, 2.0] };
//! assert!(a.dominates(&b));
//! assert!(!b.dominates(&a));
//! ```
//!
//! The default `dominates` minimises every objective. Override it when some
//! objectives are maximised.

use std::fmt::Debug;

use crate::error::{Result, SelectionError};

/// Trait for candidates ranked by the selection strategies.
///
/// Types implementing this trait must also implement `Clone`, `Debug`, `Send`
/// and `Sync`: the strength-density archive keeps clones of its members, and
/// dominance rows are evaluated in parallel for large unions.
pub trait Individual: Clone + Debug + Send + Sync {
    /// The objective vector, refreshed by the evaluator before fitness
    /// assignment. Every individual of a run exposes the same number of
    /// objectives.
    fn objectives(&self) -> &[f64];

    /// Returns `true` if `self` Pareto-dominates `other`.
    ///
    /// Implementations must be irreflexive and asymmetric. Incomparable pairs
    /// return `false` in both directions.
    fn dominates(&self, other: &Self) -> bool {
        pareto_dominates(self.objectives(), other.objectives())
    }
}

/// Pareto dominance with every objective minimised: `a` is no worse than `b`
/// everywhere and strictly better somewhere.
pub fn pareto_dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va > vb {
            return false;
        }
        if va < vb {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Checks that every individual exposes exactly `num_objectives` finite values.
pub(crate) fn validate_objectives<'a, I, It>(individuals: It, num_objectives: usize) -> Result<()>
where
    I: Individual + 'a,
    It: IntoIterator<Item = &'a I>,
{
    for (index, individual) in individuals.into_iter().enumerate() {
        let objectives = individual.objectives();
        if objectives.len() != num_objectives {
            return Err(SelectionError::ObjectiveLength {
                index,
                expected: num_objectives,
                actual: objectives.len(),
            });
        }
        if let Some(value) = objectives.iter().find(|v| !v.is_finite()) {
            return Err(SelectionError::InvalidNumericValue(format!(
                "individual {} has non-finite objective {}",
                index, value
            )));
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::Point;
    use super::*;

    #[test]
    fn test_dominance_is_irreflexive() {
        let a = Point::new(&[1.0, 2.0]);
        assert!(!a.dominates(&a));
    }

    #[test]
    fn test_dominance_requires_strict_improvement() {
        let a = Point::new(&[1.0, 2.0]);
        let b = Point::new(&[1.0, 3.0]);
        let c = Point::new(&[0.0, 4.0]);
        assert!(a.dominates(&b));
        assert!(!b.dominates(&a));
        assert!(!a.dominates(&c));
        assert!(!c.dominates(&a));
    }

    #[test]
    fn test_validate_objectives_rejects_wrong_length() {
        let pop = vec![Point::new(&[1.0, 2.0]), Point::new(&[1.0])];
        match validate_objectives(&pop, 2) {
            Err(SelectionError::ObjectiveLength { index, actual, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_objectives_rejects_nan() {
        let pop = vec![Point::new(&[f64::NAN, 2.0])];
        assert!(matches!(
            validate_objectives(&pop, 2),
            Err(SelectionError::InvalidNumericValue(_))
        ));
    }
}
