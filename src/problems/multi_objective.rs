//! Two-objective ZDT problems (Zitzler, Deb & Thiele, 2000).
//!
//! Both share `g = 1 + 9 Σ_{i≥2} x_i / (n − 1)` and `f1 = x_1`; they differ
//! in the shape function `h`. The Pareto-optimal set has `x_2.. = 0`.

use super::{coordinates, is_within};
use crate::conversion::{EvaluationError, Evaluator, Model};
use crate::variables::{DecisionSpace, DecisionVector, VariableError};
use std::f64::consts::PI;

/// Number of decision variables in the standard instances.
pub const ZDT_DIMENSIONS: usize = 30;

fn zdt_space(n: usize) -> Result<DecisionSpace, VariableError> {
    if n < 2 {
        return Err(VariableError::DimensionMismatch {
            expected: 2,
            found: n,
        });
    }
    DecisionSpace::uniform_continuous(n, 0.0, 1.0)
}

/// `(f1, g)` for a ZDT vector.
fn f1_and_g(x: &[f64]) -> (f64, f64) {
    let rest = &x[1..];
    let g = 1.0 + 9.0 * rest.iter().sum::<f64>() / rest.len() as f64;
    (x[0], g)
}

/// `points` vectors on the optimal front: `x_1 = i / points`, the rest 0.
fn pareto_front(space: &DecisionSpace, points: usize) -> Result<Vec<DecisionVector>, VariableError> {
    (0..points)
        .map(|i| {
            let mut x = vec![0.0; space.dimension()];
            x[0] = i as f64 / points as f64;
            DecisionVector::from_continuous(space, &x)
        })
        .collect()
}

/// ZDT1: convex front, `h = 1 − √(f1 / g)`.
#[derive(Debug, Clone)]
pub struct Zdt1 {
    space: DecisionSpace,
}

impl Zdt1 {
    pub fn new(n: usize) -> Result<Self, VariableError> {
        Ok(Self {
            space: zdt_space(n)?,
        })
    }

    pub fn optimal_pareto_front(&self, points: usize) -> Result<Vec<DecisionVector>, VariableError> {
        pareto_front(&self.space, points)
    }
}

impl Evaluator for Zdt1 {
    fn evaluate(&self, decision_vector: &DecisionVector) -> Result<Vec<f64>, EvaluationError> {
        let x = coordinates(decision_vector)?;
        if x.len() < 2 {
            return Err(EvaluationError::new("ZDT1 needs at least two variables"));
        }
        let (f1, g) = f1_and_g(&x);
        let h = 1.0 - (f1 / g).sqrt();
        Ok(vec![f1, g * h])
    }

    fn is_legal(&self, decision_vector: &DecisionVector) -> bool {
        is_within(&self.space, decision_vector)
    }
}

impl Model for Zdt1 {
    fn decision_space(&self) -> &DecisionSpace {
        &self.space
    }
}

/// ZDT3: disconnected front,
/// `h = 1 − √(f1 / g) − (f1 / g) sin(10π f1)`.
#[derive(Debug, Clone)]
pub struct Zdt3 {
    space: DecisionSpace,
}

impl Zdt3 {
    pub fn new(n: usize) -> Result<Self, VariableError> {
        Ok(Self {
            space: zdt_space(n)?,
        })
    }

    pub fn optimal_pareto_front(&self, points: usize) -> Result<Vec<DecisionVector>, VariableError> {
        pareto_front(&self.space, points)
    }
}

impl Evaluator for Zdt3 {
    fn evaluate(&self, decision_vector: &DecisionVector) -> Result<Vec<f64>, EvaluationError> {
        let x = coordinates(decision_vector)?;
        if x.len() < 2 {
            return Err(EvaluationError::new("ZDT3 needs at least two variables"));
        }
        let (f1, g) = f1_and_g(&x);
        let ratio = f1 / g;
        let h = 1.0 - ratio.sqrt() - ratio * (10.0 * PI * f1).sin();
        Ok(vec![f1, g * h])
    }

    fn is_legal(&self, decision_vector: &DecisionVector) -> bool {
        is_within(&self.space, decision_vector)
    }
}

impl Model for Zdt3 {
    fn decision_space(&self) -> &DecisionSpace {
        &self.space
    }
}
