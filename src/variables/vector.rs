//! Immutable decision vectors.

use super::{DecisionSpace, Value, Variable, VariableError};
use std::fmt;
use std::sync::Arc;

/// One point in a [`DecisionSpace`].
///
/// Immutable once built; every transformation returns a new vector.
/// Cloning shares the underlying storage.
///
/// Two vectors are equal when they have the same length, the same variable
/// definitions at each position and the same values at each position.
///
/// # Examples
///
/// ```
/// use u_popopt::variables::{DecisionSpace, DecisionVector};
///
/// let space = DecisionSpace::uniform_continuous(2, -5.0, 5.0).unwrap();
/// let a = DecisionVector::from_continuous(&space, &[0.0, 2.0]).unwrap();
/// let b = DecisionVector::from_continuous(&space, &[0.0, 2.0]).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct DecisionVector {
    space: DecisionSpace,
    values: Arc<[Value]>,
}

impl DecisionVector {
    /// Builds a vector from explicit values.
    ///
    /// Fails when the number of values differs from the space dimension, or
    /// when a value's variant does not match its variable. Bounds are not
    /// checked here; see [`is_in_bounds`](Self::is_in_bounds).
    pub fn from_values(
        space: &DecisionSpace,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Self, VariableError> {
        let values: Vec<Value> = values.into_iter().collect();
        if values.len() != space.dimension() {
            return Err(VariableError::DimensionMismatch {
                expected: space.dimension(),
                found: values.len(),
            });
        }
        for (var, value) in space.variables().iter().zip(&values) {
            if !var.accepts(value) {
                return Err(VariableError::TypeMismatch {
                    name: var.name().to_owned(),
                    expected: var.kind(),
                    found: value.kind(),
                });
            }
        }
        Ok(Self::from_parts(space.clone(), values))
    }

    /// Builds a vector of real values over a fully continuous space.
    pub fn from_continuous(space: &DecisionSpace, values: &[f64]) -> Result<Self, VariableError> {
        Self::from_values(space, values.iter().map(|&v| Value::Continuous(v)))
    }

    /// Builds a vector of integers over a fully discrete space.
    pub fn from_discrete(space: &DecisionSpace, values: &[i64]) -> Result<Self, VariableError> {
        Self::from_values(space, values.iter().map(|&v| Value::Discrete(v)))
    }

    /// The zero-length vector.
    ///
    /// Returned by a search strategy to signal that no further candidates
    /// can be proposed.
    pub fn empty() -> Self {
        Self::from_parts(DecisionSpace::new(Vec::new()), Vec::new())
    }

    pub(crate) fn from_parts(space: DecisionSpace, values: Vec<Value>) -> Self {
        Self {
            space,
            values: values.into(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether this is the empty termination sentinel.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The space this vector belongs to.
    pub fn space(&self) -> &DecisionSpace {
        &self.space
    }

    /// All values in order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Iterates `(variable, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Value)> {
        self.space.variables().iter().zip(self.values.iter())
    }

    /// Continuous elements with their positions.
    pub fn continuous_elements(&self) -> Vec<(usize, f64)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| match v {
                Value::Continuous(x) => Some((i, *x)),
                _ => None,
            })
            .collect()
    }

    /// Discrete elements with their positions.
    pub fn discrete_elements(&self) -> Vec<(usize, i64)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| match v {
                Value::Discrete(x) => Some((i, *x)),
                _ => None,
            })
            .collect()
    }

    /// Categorical elements with their positions.
    pub fn categorical_elements(&self) -> Vec<(usize, usize)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| match v {
                Value::Categorical(x) => Some((i, *x)),
                _ => None,
            })
            .collect()
    }

    /// All elements as real numbers.
    ///
    /// Discrete values are widened; categorical elements fail.
    pub fn to_continuous(&self) -> Result<Vec<f64>, VariableError> {
        self.iter()
            .map(|(var, value)| {
                value.as_f64().ok_or_else(|| VariableError::TypeMismatch {
                    name: var.name().to_owned(),
                    expected: "numeric",
                    found: value.kind(),
                })
            })
            .collect()
    }

    /// Whether every element is legal for its variable.
    pub fn is_in_bounds(&self) -> bool {
        self.iter()
            .all(|(var, value)| var.is_in_bounds(value).unwrap_or(false))
    }

    /// A copy with the value at `index` replaced.
    pub fn with_value(&self, index: usize, value: Value) -> Result<Self, VariableError> {
        let mut values = self.values.to_vec();
        let slot = values.get_mut(index).ok_or(VariableError::IndexOutOfRange {
            index,
            len: self.len(),
        })?;
        *slot = value;
        Self::from_values(&self.space, values)
    }

    /// A copy with the values at `i` and `j` exchanged.
    ///
    /// Only the values move; the variable definitions stay in place, so both
    /// values must be valid variants for their new positions.
    pub fn swapped(&self, i: usize, j: usize) -> Result<Self, VariableError> {
        let len = self.len();
        for index in [i, j] {
            if index >= len {
                return Err(VariableError::IndexOutOfRange { index, len });
            }
        }
        let mut values = self.values.to_vec();
        values.swap(i, j);
        Self::from_values(&self.space, values)
    }
}

impl PartialEq for DecisionVector {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.space == other.space
    }
}

impl fmt::Display for DecisionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (var, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match var.format_as_string(value) {
                Ok(s) => write!(f, "{s}")?,
                Err(_) => write!(f, "{value}")?,
            }
        }
        write!(f, "]")
    }
}
