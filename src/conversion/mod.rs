//! Boundary contracts between the engine and a concrete problem.
//!
//! - [`Evaluator`]: computes the raw solution vector for a decision vector
//!   and decides legality
//! - [`Model`]: owns the decision space and creates new candidates
//!
//! The engine never calls an evaluator itself; the caller (or
//! [`OptimiserRunner`](crate::runner::OptimiserRunner)) does, between
//! [`get_next_to_evaluate`](crate::management::Optimiser::get_next_to_evaluate)
//! and [`re_insert`](crate::management::Optimiser::re_insert).

use crate::management::{Individual, IndividualError, IndividualState};
use crate::variables::{DecisionSpace, DecisionVector};
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;

/// Property key under which [`Evaluator::evaluate_individual`] stores the
/// raw solution before recording it.
pub const SOLUTION_KEY: &str = "solution";

/// Failure of an external evaluation.
///
/// Recorded on the individual; [`re_insert`](crate::management::Optimiser::re_insert)
/// turns it into a fatal [`OptimiserError::EvaluationFailed`](crate::management::OptimiserError::EvaluationFailed).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EvaluationError {
    message: String,
    #[source]
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl EvaluationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying error.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Computes solutions for decision vectors.
///
/// Implementations must be `Send + Sync`: the runner may evaluate a batch
/// in parallel with the `parallel` feature.
pub trait Evaluator: Send + Sync {
    /// The raw solution vector (objective values) at `decision_vector`.
    fn evaluate(&self, decision_vector: &DecisionVector) -> Result<Vec<f64>, EvaluationError>;

    /// Whether `decision_vector` satisfies the problem constraints.
    ///
    /// Defaults to every element lying within its variable's bounds.
    fn is_legal(&self, decision_vector: &DecisionVector) -> bool {
        decision_vector.is_in_bounds()
    }

    /// Evaluates an individual and records the outcome on it.
    ///
    /// A `New` individual is sent for evaluation first. Illegal vectors are
    /// marked illegal without calling [`evaluate`](Self::evaluate); an
    /// evaluation failure is stored as the individual's evaluation error.
    /// Either way the individual ends `Evaluated`.
    fn evaluate_individual(&self, individual: &mut Individual) -> Result<(), IndividualError> {
        if individual.state() == IndividualState::New {
            individual.send_for_evaluation()?;
        }

        if !self.is_legal(individual.decision_vector()) {
            return individual.set_illegal();
        }

        match self.evaluate(individual.decision_vector()) {
            Ok(solution) => {
                individual.set_property(SOLUTION_KEY, solution);
                individual.set_solution(SOLUTION_KEY)
            }
            Err(e) => individual.set_evaluation_error(e),
        }
    }
}

/// A problem definition: decision space plus candidate factory.
pub trait Model {
    fn decision_space(&self) -> &DecisionSpace;

    /// A fresh decision vector. Defaults to a uniform random draw.
    fn new_decision_vector<R: Rng>(&self, rng: &mut R) -> DecisionVector {
        self.decision_space().random_vector(rng)
    }

    /// A `New` individual at a fresh decision vector.
    fn new_individual<R: Rng>(&self, rng: &mut R) -> Individual {
        Individual::new(self.new_decision_vector(rng))
    }
}
