//! Benchmark problems.
//!
//! Each problem is both a [`Model`](crate::conversion::Model) (it owns its
//! decision space) and an [`Evaluator`](crate::conversion::Evaluator). A
//! decision vector is legal when every value lies within the bounds of the
//! problem's own space, whatever space the vector was built over.
//!
//! | Problem | Objectives | Domain | Optimum |
//! |---|---|---|---|
//! | [`Rosenbrock`] | 1 | `[-5, 10)^n` | `(1, …, 1)` → 0 |
//! | [`Schwefel`] | 1 | `[-500, 500)^n` | `(420.9687, …)` → ≈0 |
//! | [`Zdt1`] | 2 | `[0, 1)^n` | convex front, `x_2.. = 0` |
//! | [`Zdt3`] | 2 | `[0, 1)^n` | disconnected front, `x_2.. = 0` |

mod multi_objective;
mod single_objective;

pub use multi_objective::{Zdt1, Zdt3, ZDT_DIMENSIONS};
pub use single_objective::{Rosenbrock, Schwefel};

use crate::conversion::EvaluationError;
use crate::variables::{DecisionSpace, DecisionVector};

/// Whether `decision_vector` fits `space` position by position.
pub(crate) fn is_within(space: &DecisionSpace, decision_vector: &DecisionVector) -> bool {
    decision_vector.len() == space.dimension()
        && space
            .variables()
            .iter()
            .zip(decision_vector.values())
            .all(|(var, value)| var.is_in_bounds(value).unwrap_or(false))
}

/// The vector's values as reals.
pub(crate) fn coordinates(decision_vector: &DecisionVector) -> Result<Vec<f64>, EvaluationError> {
    decision_vector
        .to_continuous()
        .map_err(|e| EvaluationError::with_source("benchmark problems need continuous values", e))
}
