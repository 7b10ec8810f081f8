//! Decision variables, decision spaces and decision vectors.
//!
//! A [`DecisionSpace`] is an ordered list of [`Variable`] definitions. A
//! [`DecisionVector`] pairs each variable with a [`Value`]: one point in the
//! search space. Vectors may be heterogeneous: continuous, discrete and
//! categorical elements can be mixed in one vector.
//!
//! # Variable contract
//!
//! Every variable kind supports:
//!
//! - [`Variable::is_in_bounds`]: legality check (type error on wrong-typed input)
//! - [`Variable::get_next_random`]: uniform draw of a legal value
//! - [`Variable::format_as_string`]: display form of a value
//! - [`Variable::add_or_wrap`]: bounded arithmetic, wrapping at the bounds

mod categorical;
mod continuous;
mod discrete;
mod error;
mod space;
mod vector;

pub use categorical::VariableCategorical;
pub use continuous::VariableContinuous;
pub use discrete::VariableDiscrete;
pub use error::VariableError;
pub use space::DecisionSpace;
pub use vector::DecisionVector;

use rand::Rng;
use std::fmt;

/// A single element of a decision vector.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Real number for a [`VariableContinuous`].
    Continuous(f64),
    /// Integer for a [`VariableDiscrete`].
    Discrete(i64),
    /// Label index for a [`VariableCategorical`].
    Categorical(usize),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Continuous(_) => "continuous",
            Value::Discrete(_) => "discrete",
            Value::Categorical(_) => "categorical",
        }
    }

    /// Numeric view of the value. Categorical indices have none.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Continuous(v) => Some(v),
            Value::Discrete(v) => Some(v as f64),
            Value::Categorical(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Continuous(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Discrete(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Continuous(v) => write!(f, "{v}"),
            Value::Discrete(v) => write!(f, "{v}"),
            Value::Categorical(i) => write!(f, "#{i}"),
        }
    }
}

/// A variable definition: one dimension of a decision space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variable {
    Continuous(VariableContinuous),
    Discrete(VariableDiscrete),
    Categorical(VariableCategorical),
}

impl Variable {
    /// Variable name.
    pub fn name(&self) -> &str {
        match self {
            Variable::Continuous(v) => v.name(),
            Variable::Discrete(v) => v.name(),
            Variable::Categorical(v) => v.name(),
        }
    }

    /// Short name of the variable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Variable::Continuous(_) => "continuous",
            Variable::Discrete(_) => "discrete",
            Variable::Categorical(_) => "categorical",
        }
    }

    /// Whether `value` has the variant this variable stores.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Variable::Continuous(_), Value::Continuous(_))
                | (Variable::Discrete(_), Value::Discrete(_))
                | (Variable::Categorical(_), Value::Categorical(_))
        )
    }

    /// Whether `value` is a legal value of this variable.
    ///
    /// Fails with [`VariableError::TypeMismatch`] when `value` has the
    /// wrong variant.
    pub fn is_in_bounds(&self, value: &Value) -> Result<bool, VariableError> {
        match (self, value) {
            (Variable::Continuous(v), Value::Continuous(x)) => Ok(v.contains(*x)),
            (Variable::Discrete(v), Value::Discrete(x)) => Ok(v.contains(*x)),
            (Variable::Categorical(v), Value::Categorical(i)) => Ok(v.contains(*i)),
            _ => Err(self.mismatch(value)),
        }
    }

    /// Draws a legal value at random.
    pub fn get_next_random<R: Rng>(&self, rng: &mut R) -> Value {
        match self {
            Variable::Continuous(v) => Value::Continuous(v.sample(rng)),
            Variable::Discrete(v) => Value::Discrete(v.sample(rng)),
            Variable::Categorical(v) => Value::Categorical(v.sample(rng)),
        }
    }

    /// Formats `value` for display.
    pub fn format_as_string(&self, value: &Value) -> Result<String, VariableError> {
        match (self, value) {
            (Variable::Continuous(_), Value::Continuous(x)) => Ok(format!("{x:.4}")),
            (Variable::Discrete(_), Value::Discrete(x)) => Ok(x.to_string()),
            (Variable::Categorical(v), Value::Categorical(i)) => v
                .label(*i)
                .map(str::to_owned)
                .ok_or(VariableError::IndexOutOfRange {
                    index: *i,
                    len: v.labels().len(),
                }),
            _ => Err(self.mismatch(value)),
        }
    }

    /// Adds `delta` to `value`, returning a legal value.
    ///
    /// Continuous variables accept continuous or discrete operands and
    /// always return a continuous value. Discrete and categorical variables
    /// require an integer `delta`.
    pub fn add_or_wrap(&self, value: &Value, delta: &Value) -> Result<Value, VariableError> {
        match self {
            Variable::Continuous(v) => {
                let x = value.as_f64().ok_or_else(|| self.mismatch(value))?;
                let d = delta.as_f64().ok_or_else(|| self.mismatch(delta))?;
                Ok(Value::Continuous(v.wrap_add(x, d)))
            }
            Variable::Discrete(v) => match (value, delta) {
                (Value::Discrete(x), Value::Discrete(d)) => Ok(Value::Discrete(v.wrap_add(*x, *d))),
                (Value::Discrete(_), other) | (other, _) => Err(self.mismatch(other)),
            },
            Variable::Categorical(v) => match (value, delta) {
                (Value::Categorical(i), Value::Discrete(d)) => {
                    Ok(Value::Categorical(v.wrap_add(*i, *d)))
                }
                (Value::Categorical(_), other) | (other, _) => Err(self.mismatch(other)),
            },
        }
    }

    fn mismatch(&self, found: &Value) -> VariableError {
        VariableError::TypeMismatch {
            name: self.name().to_owned(),
            expected: self.kind(),
            found: found.kind(),
        }
    }
}

impl From<VariableContinuous> for Variable {
    fn from(v: VariableContinuous) -> Self {
        Variable::Continuous(v)
    }
}

impl From<VariableDiscrete> for Variable {
    fn from(v: VariableDiscrete) -> Self {
        Variable::Discrete(v)
    }
}

impl From<VariableCategorical> for Variable {
    fn from(v: VariableCategorical) -> Self {
        Variable::Categorical(v)
    }
}
