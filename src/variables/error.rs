use thiserror::Error;

/// Errors raised by variable definitions and decision vectors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VariableError {
    #[error("invalid bounds for variable `{name}`: {reason}")]
    InvalidBounds { name: String, reason: &'static str },

    #[error("variable `{name}` expects a {expected} value, got {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("decision space has {expected} dimensions, got {found} values")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("index {index} out of range for decision vector of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
