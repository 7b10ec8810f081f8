//! Mutation operators.
//!
//! Each operator returns a new decision vector; the input is never changed.
//! Arithmetic goes through [`Variable::add_or_wrap`](crate::variables::Variable::add_or_wrap),
//! so mutated values always stay within their variable's bounds.

use crate::management::OperatorError;
use crate::variables::{DecisionVector, Value};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};
use std::fmt;

/// Perturbs one decision vector.
pub trait MutationOperator: Send + Sync + fmt::Debug {
    fn operate(
        &self,
        decision_vector: &DecisionVector,
        rng: &mut dyn RngCore,
    ) -> Result<DecisionVector, OperatorError>;
}

fn check_probability(p: f64) -> Result<f64, OperatorError> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(OperatorError::ProbabilityOutOfRange(p))
    }
}

fn check_max_mutations(max: usize) -> Result<usize, OperatorError> {
    if max == 0 {
        Err(OperatorError::InvalidArgument {
            name: "maximum number of mutations",
            reason: "must be at least 1",
        })
    } else {
        Ok(max)
    }
}

/// Continuous positions to perturb: `max` draws, each kept with
/// probability `p`. Positions are drawn with replacement, so one position
/// may be perturbed more than once.
fn pick_locations(
    decision_vector: &DecisionVector,
    max: usize,
    probability: f64,
    rng: &mut dyn RngCore,
) -> Result<Vec<usize>, OperatorError> {
    let candidates: Vec<usize> = decision_vector
        .continuous_elements()
        .into_iter()
        .map(|(i, _)| i)
        .collect();
    if candidates.is_empty() {
        return Err(OperatorError::NotContinuous);
    }
    Ok((0..max)
        .filter_map(|_| {
            rng.random_bool(probability)
                .then(|| candidates[rng.random_range(0..candidates.len())])
        })
        .collect())
}

// ============================================================================
// Random swap
// ============================================================================

/// Exchanges the values at two distinct random positions.
///
/// Fails on vectors with fewer than two elements. Only values move; the
/// variable definitions stay in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationRandomSwap {
    probability: f64,
}

impl MutationRandomSwap {
    /// `probability` of performing the swap, in [0, 1].
    pub fn new(probability: f64) -> Result<Self, OperatorError> {
        Ok(Self {
            probability: check_probability(probability)?,
        })
    }
}

impl MutationOperator for MutationRandomSwap {
    fn operate(
        &self,
        decision_vector: &DecisionVector,
        rng: &mut dyn RngCore,
    ) -> Result<DecisionVector, OperatorError> {
        let len = decision_vector.len();
        if len < 2 {
            return Err(OperatorError::TooFewElements {
                required: 2,
                found: len,
            });
        }
        if !rng.random_bool(self.probability) {
            return Ok(decision_vector.clone());
        }
        let i = rng.random_range(0..len);
        let mut j = rng.random_range(0..len - 1);
        if j >= i {
            j += 1;
        }
        Ok(decision_vector.swapped(i, j)?)
    }
}

// ============================================================================
// Gaussian perturbation
// ============================================================================

/// Adds `N(0, σ)` noise to up to `max` continuous positions.
///
/// Fails on vectors without continuous elements; other elements are copied.
#[derive(Debug, Clone, Copy)]
pub struct MutationAddRandomNumber {
    normal: Normal<f64>,
    probability: f64,
    max_mutations: usize,
}

impl MutationAddRandomNumber {
    pub fn new(
        std_dev: f64,
        probability: f64,
        max_mutations: usize,
    ) -> Result<Self, OperatorError> {
        if !(std_dev.is_finite() && std_dev > 0.0) {
            return Err(OperatorError::InvalidArgument {
                name: "standard deviation",
                reason: "must be positive and finite",
            });
        }
        let normal = Normal::new(0.0, std_dev).map_err(|_| OperatorError::InvalidArgument {
            name: "standard deviation",
            reason: "must be positive and finite",
        })?;
        Ok(Self {
            normal,
            probability: check_probability(probability)?,
            max_mutations: check_max_mutations(max_mutations)?,
        })
    }

    pub fn std_dev(&self) -> f64 {
        self.normal.std_dev()
    }
}

impl MutationOperator for MutationAddRandomNumber {
    fn operate(
        &self,
        decision_vector: &DecisionVector,
        rng: &mut dyn RngCore,
    ) -> Result<DecisionVector, OperatorError> {
        let locations =
            pick_locations(decision_vector, self.max_mutations, self.probability, rng)?;
        let mut values = decision_vector.values().to_vec();
        let variables = decision_vector.space().variables();

        for i in locations {
            let delta = Value::Continuous(self.normal.sample(rng));
            values[i] = variables[i].add_or_wrap(&values[i], &delta)?;
        }
        Ok(DecisionVector::from_values(decision_vector.space(), values)?)
    }
}

// ============================================================================
// Perturbation from a set
// ============================================================================

/// Adds a value drawn from a fixed set to up to `max` continuous positions.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationAddRandomNumberFromSet {
    numbers: Vec<f64>,
    probability: f64,
    max_mutations: usize,
}

impl MutationAddRandomNumberFromSet {
    pub fn new(
        numbers: Vec<f64>,
        probability: f64,
        max_mutations: usize,
    ) -> Result<Self, OperatorError> {
        if numbers.is_empty() || numbers.iter().any(|n| !n.is_finite()) {
            return Err(OperatorError::InvalidArgument {
                name: "number set",
                reason: "must be non-empty and finite",
            });
        }
        Ok(Self {
            numbers,
            probability: check_probability(probability)?,
            max_mutations: check_max_mutations(max_mutations)?,
        })
    }
}

impl MutationOperator for MutationAddRandomNumberFromSet {
    fn operate(
        &self,
        decision_vector: &DecisionVector,
        rng: &mut dyn RngCore,
    ) -> Result<DecisionVector, OperatorError> {
        let locations =
            pick_locations(decision_vector, self.max_mutations, self.probability, rng)?;
        let mut values = decision_vector.values().to_vec();
        let variables = decision_vector.space().variables();

        for i in locations {
            let delta = Value::Continuous(self.numbers[rng.random_range(0..self.numbers.len())]);
            values[i] = variables[i].add_or_wrap(&values[i], &delta)?;
        }
        Ok(DecisionVector::from_values(decision_vector.space(), values)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
