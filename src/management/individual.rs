//! Candidate lifecycle.
//!
//! An [`Individual`] wraps one [`DecisionVector`] on its way through
//! external evaluation:
//!
//! ```text
//! New ──send_for_evaluation──▶ AwaitingEvaluation ──set_solution──────────▶ Evaluated
//!                                                 ──set_illegal───────────▶ Evaluated
//!                                                 ──set_evaluation_error──▶ Evaluated
//!                                                 ──set_fitness_penalty───▶ Evaluated
//! ```
//!
//! Transitions only move forward. Score and fitness are assigned after the
//! individual is `Evaluated`, normally by a
//! [`FitnessCalculator`](crate::fitness::FitnessCalculator).

use super::errors::IndividualError;
use crate::conversion::EvaluationError;
use crate::variables::DecisionVector;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Lifecycle state of an [`Individual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndividualState {
    /// Created, no evaluation requested.
    New,
    /// Handed to an external evaluator.
    AwaitingEvaluation,
    /// Outcome recorded (solution, illegality, or evaluation failure).
    Evaluated,
}

/// A value stored in an individual's open property map.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Float(f64),
    Integer(i64),
    Vector(Vec<f64>),
    Text(String),
    Flag(bool),
    Time(DateTime<Utc>),
}

impl PropertyValue {
    fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Float(_) => "float",
            PropertyValue::Integer(_) => "integer",
            PropertyValue::Vector(_) => "vector",
            PropertyValue::Text(_) => "text",
            PropertyValue::Flag(_) => "flag",
            PropertyValue::Time(_) => "time",
        }
    }
}

/// Types readable from a [`PropertyValue`].
pub trait PropertyType: Sized {
    /// Name used in type-mismatch errors.
    const TYPE_NAME: &'static str;

    fn from_property(value: &PropertyValue) -> Option<Self>;
}

macro_rules! property_type {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl PropertyType for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_property(value: &PropertyValue) -> Option<Self> {
                match value {
                    PropertyValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }

        impl From<$ty> for PropertyValue {
            fn from(v: $ty) -> Self {
                PropertyValue::$variant(v)
            }
        }
    };
}

property_type!(f64, Float, "float");
property_type!(i64, Integer, "integer");
property_type!(Vec<f64>, Vector, "vector");
property_type!(String, Text, "text");
property_type!(bool, Flag, "flag");
property_type!(DateTime<Utc>, Time, "time");

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Text(v.to_owned())
    }
}

impl From<&[f64]> for PropertyValue {
    fn from(v: &[f64]) -> Self {
        PropertyValue::Vector(v.to_vec())
    }
}

/// Well-known bookkeeping written by the optimisation engine.
#[derive(Debug, Clone, Default)]
struct Reserved {
    solution: Option<Vec<f64>>,
    score: Option<Vec<f64>>,
    fitness: Option<f64>,
    legal: Option<bool>,
    creation_time: Option<DateTime<Utc>>,
    creation_index: Option<usize>,
    reinsertion_time: Option<DateTime<Utc>>,
    evaluation_error: Option<EvaluationError>,
    reinsertion_error: Option<String>,
}

/// One decision vector plus its evaluation lifecycle and derived metrics.
///
/// Equality is decision-vector equality: two individuals at the same point
/// are the same individual regardless of evaluation state.
///
/// `Clone` produces a full, independent copy (state and properties
/// included). Use [`clone_unevaluated`](Self::clone_unevaluated) to branch a
/// fresh candidate from the same point.
#[derive(Debug, Clone)]
pub struct Individual {
    decision_vector: DecisionVector,
    state: IndividualState,
    reserved: Reserved,
    properties: HashMap<String, PropertyValue>,
}

impl Individual {
    /// Wraps a decision vector in a `New` individual.
    pub fn new(decision_vector: DecisionVector) -> Self {
        Self {
            decision_vector,
            state: IndividualState::New,
            reserved: Reserved::default(),
            properties: HashMap::new(),
        }
    }

    /// The point this individual represents.
    pub fn decision_vector(&self) -> &DecisionVector {
        &self.decision_vector
    }

    /// Current lifecycle state.
    pub fn state(&self) -> IndividualState {
        self.state
    }

    /// A `New` individual at the same point, with no properties.
    pub fn clone_unevaluated(&self) -> Self {
        Self::new(self.decision_vector.clone())
    }

    // ---- Open property map ----

    /// Inserts or overwrites a property.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Reads a property as `T`.
    pub fn get_property<T: PropertyType>(&self, key: &str) -> Result<T, IndividualError> {
        let value = self
            .properties
            .get(key)
            .ok_or_else(|| IndividualError::PropertyNotFound {
                key: key.to_owned(),
            })?;
        T::from_property(value).ok_or_else(|| IndividualError::PropertyTypeMismatch {
            key: key.to_owned(),
            expected: T::TYPE_NAME,
        })
    }

    /// Whether a property is present.
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Names of all open properties.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Type name of a stored property, if present.
    pub fn property_type(&self, key: &str) -> Option<&'static str> {
        self.properties.get(key).map(PropertyValue::type_name)
    }

    // ---- Lifecycle ----

    /// Marks the individual as handed to an evaluator.
    pub fn send_for_evaluation(&mut self) -> Result<(), IndividualError> {
        self.require(IndividualState::New, "send for evaluation")?;
        self.state = IndividualState::AwaitingEvaluation;
        Ok(())
    }

    /// Records the raw evaluation result stored under `key` as the solution
    /// vector.
    pub fn set_solution(&mut self, key: &str) -> Result<(), IndividualError> {
        self.require(IndividualState::AwaitingEvaluation, "set the solution of")?;
        let solution: Vec<f64> = self.get_property(key)?;
        self.reserved.solution = Some(solution);
        self.reserved.legal.get_or_insert(true);
        self.state = IndividualState::Evaluated;
        Ok(())
    }

    /// Records that the decision vector violates the problem constraints.
    /// No solution is stored; fitness must come from a penalty.
    pub fn set_illegal(&mut self) -> Result<(), IndividualError> {
        self.require(IndividualState::AwaitingEvaluation, "mark as illegal")?;
        self.reserved.legal = Some(false);
        self.state = IndividualState::Evaluated;
        Ok(())
    }

    /// Records that external evaluation failed.
    pub fn set_evaluation_error(&mut self, error: EvaluationError) -> Result<(), IndividualError> {
        self.require(IndividualState::AwaitingEvaluation, "record an evaluation error on")?;
        self.reserved.evaluation_error = Some(error);
        self.state = IndividualState::Evaluated;
        Ok(())
    }

    /// Computes the score from the solution vector.
    pub fn set_score<F>(&mut self, solution_to_score: F) -> Result<(), IndividualError>
    where
        F: FnOnce(&[f64]) -> Vec<f64>,
    {
        let score = solution_to_score(self.solution_vector()?);
        self.reserved.score = Some(score);
        Ok(())
    }

    /// Computes the fitness from the score.
    pub fn set_fitness<F>(&mut self, score_to_fitness: F) -> Result<(), IndividualError>
    where
        F: FnOnce(&[f64]) -> f64,
    {
        self.require(IndividualState::Evaluated, "assign fitness to")?;
        let fitness = score_to_fitness(self.score()?);
        self.reserved.fitness = Some(fitness);
        Ok(())
    }

    /// Assigns a fitness directly, without a solution or score.
    ///
    /// Used for illegal or failed candidates; an individual still awaiting
    /// evaluation moves straight to `Evaluated`.
    pub fn set_fitness_penalty(&mut self, fitness: f64) -> Result<(), IndividualError> {
        if self.state == IndividualState::New {
            return Err(IndividualError::InvalidState {
                operation: "assign a penalty to",
                state: self.state,
            });
        }
        self.reserved.fitness = Some(fitness);
        self.state = IndividualState::Evaluated;
        Ok(())
    }

    // ---- Derived reads ----

    /// The solution vector recorded by [`set_solution`](Self::set_solution).
    pub fn solution_vector(&self) -> Result<&[f64], IndividualError> {
        self.reserved
            .solution
            .as_deref()
            .ok_or_else(|| reserved_missing("solution_vector"))
    }

    /// The score computed by [`set_score`](Self::set_score).
    pub fn score(&self) -> Result<&[f64], IndividualError> {
        self.reserved
            .score
            .as_deref()
            .ok_or_else(|| reserved_missing("score"))
    }

    /// The scalar fitness. Lower is better.
    pub fn fitness(&self) -> Result<f64, IndividualError> {
        self.reserved
            .fitness
            .ok_or_else(|| reserved_missing("fitness"))
    }

    /// Whether the decision vector satisfied the problem constraints.
    /// `true` until told otherwise.
    pub fn is_legal(&self) -> bool {
        self.reserved.legal.unwrap_or(true)
    }

    /// The evaluation failure, if one was recorded.
    pub fn evaluation_error(&self) -> Option<&EvaluationError> {
        self.reserved.evaluation_error.as_ref()
    }

    /// Why reinsertion rejected this individual, if it did.
    pub fn reinsertion_error(&self) -> Option<&str> {
        self.reserved.reinsertion_error.as_deref()
    }

    /// When the optimiser proposed this individual.
    pub fn creation_time(&self) -> Option<DateTime<Utc>> {
        self.reserved.creation_time
    }

    /// Sequence number assigned by the optimiser at proposal.
    pub fn creation_index(&self) -> Option<usize> {
        self.reserved.creation_index
    }

    /// When the individual was last handed back to the optimiser.
    pub fn reinsertion_time(&self) -> Option<DateTime<Utc>> {
        self.reserved.reinsertion_time
    }

    pub(crate) fn stamp_creation(&mut self, index: usize) {
        self.reserved.creation_time = Some(Utc::now());
        self.reserved.creation_index = Some(index);
    }

    pub(crate) fn stamp_reinsertion(&mut self) {
        self.reserved.reinsertion_time = Some(Utc::now());
    }

    pub(crate) fn set_reinsertion_error(&mut self, reason: impl Into<String>) {
        self.reserved.reinsertion_error = Some(reason.into());
    }

    fn require(
        &self,
        expected: IndividualState,
        operation: &'static str,
    ) -> Result<(), IndividualError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(IndividualError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}

fn reserved_missing(key: &str) -> IndividualError {
    IndividualError::PropertyNotFound {
        key: key.to_owned(),
    }
}

impl PartialEq for Individual {
    fn eq(&self, other: &Self) -> bool {
        self.decision_vector == other.decision_vector
    }
}
