use super::individual::IndividualState;
use crate::conversion::EvaluationError;
use crate::variables::VariableError;
use thiserror::Error;

/// Errors raised by [`Individual`](super::Individual) property access and
/// lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndividualError {
    #[error("property `{key}` not found")]
    PropertyNotFound { key: String },

    #[error("property `{key}` is not of type {expected}")]
    PropertyTypeMismatch { key: String, expected: &'static str },

    #[error("cannot {operation} an individual in state {state:?}")]
    InvalidState {
        operation: &'static str,
        state: IndividualState,
    },
}

/// Errors raised by [`Population`](super::Population).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PopulationError {
    #[error("decision vector has length {found}, population expects {expected}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("individual is not yet evaluated (state {state:?})")]
    NotEvaluated { state: IndividualState },

    #[error("individual has no fitness assigned")]
    FitnessMissing,

    #[error("population has no members")]
    Empty,
}

/// Errors raised by the [`Optimiser`](super::Optimiser) ask/tell loop.
#[derive(Debug, Error)]
pub enum OptimiserError {
    /// The proposal loop ran out of attempts.
    #[error("could not create enough acceptable new individuals: {created} of {requested} after {attempts} attempts")]
    Exhausted {
        requested: usize,
        created: usize,
        attempts: usize,
    },

    /// A strategy declined to propose a candidate.
    #[error("proposal rejected: {0}")]
    Proposal(String),

    #[error("individual is not evaluated (state {state:?})")]
    NotEvaluated { state: IndividualState },

    /// An individual carried an evaluation failure; the run must stop.
    #[error("individual evaluation failed, arresting optimisation")]
    EvaluationFailed(#[source] EvaluationError),

    /// Population insertion failed while deciding an individual's fate.
    #[error("error occurred while re-inserting individuals")]
    Reinsertion(#[source] PopulationError),

    #[error("fitness assignment failed: {0}")]
    Fitness(#[from] IndividualError),

    #[error(transparent)]
    Variable(#[from] VariableError),

    #[error(transparent)]
    Operator(#[from] OperatorError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Errors raised by search operators (simplex moves, mutation,
/// recombination, reinsertion).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperatorError {
    #[error("{operator} coefficient {value} outside {range}")]
    CoefficientOutOfRange {
        operator: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("probability {0} outside [0, 1]")]
    ProbabilityOutOfRange(f64),

    #[error("invalid {name}: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    #[error("operator needs at least {required} elements, got {found}")]
    TooFewElements { required: usize, found: usize },

    #[error("operator needs at least {required} parents, got {found}")]
    TooFewParents { required: usize, found: usize },

    #[error("parents have different lengths ({first} and {other})")]
    ParentLengthMismatch { first: usize, other: usize },

    #[error("operator requires a fully continuous decision vector")]
    NotContinuous,

    #[error("simplex needs {expected} vertices, got {found}")]
    SimplexSize { expected: usize, found: usize },

    #[error("simplex vertex {index} has no fitness")]
    VertexFitnessMissing { index: usize },

    #[error(transparent)]
    Variable(#[from] VariableError),
}
