use super::{coordinates, is_within};
use crate::conversion::{EvaluationError, Evaluator, Model};
use crate::variables::{DecisionSpace, DecisionVector, VariableError};

/// The Rosenbrock valley,
/// `Σ 100 (x_{i+1} − x_i²)² + (1 − x_i)²`.
#[derive(Debug, Clone)]
pub struct Rosenbrock {
    space: DecisionSpace,
}

impl Rosenbrock {
    /// An `n`-dimensional instance (`n ≥ 2`).
    pub fn new(n: usize) -> Result<Self, VariableError> {
        if n < 2 {
            return Err(VariableError::DimensionMismatch {
                expected: 2,
                found: n,
            });
        }
        Ok(Self {
            space: DecisionSpace::uniform_continuous(n, -5.0, 10.0)?,
        })
    }

    /// `(1, …, 1)`.
    pub fn global_optimum(&self) -> Result<DecisionVector, VariableError> {
        DecisionVector::from_continuous(&self.space, &vec![1.0; self.space.dimension()])
    }
}

impl Evaluator for Rosenbrock {
    fn evaluate(&self, decision_vector: &DecisionVector) -> Result<Vec<f64>, EvaluationError> {
        let x = coordinates(decision_vector)?;
        let value = x
            .windows(2)
            .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
            .sum();
        Ok(vec![value])
    }

    fn is_legal(&self, decision_vector: &DecisionVector) -> bool {
        is_within(&self.space, decision_vector)
    }
}

impl Model for Rosenbrock {
    fn decision_space(&self) -> &DecisionSpace {
        &self.space
    }
}

/// Schwefel's function,
/// `418.9829 n − Σ x_i sin(√|x_i|)`.
///
/// Random initialisation is restricted to `[-250, 475)` so that starting
/// points are not placed symmetrically around the optimum.
#[derive(Debug, Clone)]
pub struct Schwefel {
    space: DecisionSpace,
}

impl Schwefel {
    /// Location of the global minimum along each axis.
    pub const OPTIMUM: f64 = 420.9687;

    pub fn new(n: usize) -> Result<Self, VariableError> {
        if n == 0 {
            return Err(VariableError::DimensionMismatch {
                expected: 1,
                found: 0,
            });
        }
        Ok(Self {
            space: DecisionSpace::uniform_continuous_with_initial_range(
                n, -500.0, 500.0, -250.0, 475.0,
            )?,
        })
    }

    pub fn global_optimum(&self) -> Result<DecisionVector, VariableError> {
        DecisionVector::from_continuous(&self.space, &vec![Self::OPTIMUM; self.space.dimension()])
    }
}

impl Evaluator for Schwefel {
    fn evaluate(&self, decision_vector: &DecisionVector) -> Result<Vec<f64>, EvaluationError> {
        let x = coordinates(decision_vector)?;
        let value = 418.9829 * x.len() as f64
            - x.iter().map(|t| t * t.abs().sqrt().sin()).sum::<f64>();
        Ok(vec![value])
    }

    fn is_legal(&self, decision_vector: &DecisionVector) -> bool {
        is_within(&self.space, decision_vector)
    }
}

impl Model for Schwefel {
    fn decision_space(&self) -> &DecisionSpace {
        &self.space
    }
}
