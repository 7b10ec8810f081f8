//! Decision space: the ordered list of variable definitions.

use super::{
    DecisionVector, Value, Variable, VariableContinuous, VariableDiscrete, VariableError,
};
use rand::Rng;
use std::sync::Arc;

/// An ordered, immutable list of [`Variable`]s.
///
/// Cloning is cheap: the variable list is shared. Equality compares the
/// definitions by value.
#[derive(Debug, Clone)]
pub struct DecisionSpace {
    variables: Arc<[Variable]>,
}

impl DecisionSpace {
    /// Creates a space from variable definitions.
    pub fn new(variables: impl IntoIterator<Item = Variable>) -> Self {
        Self {
            variables: variables.into_iter().collect(),
        }
    }

    /// `n` identical continuous variables on `[lower, upper)`.
    pub fn uniform_continuous(n: usize, lower: f64, upper: f64) -> Result<Self, VariableError> {
        let vars = (0..n)
            .map(|i| VariableContinuous::named(format!("x{i}"), lower, upper).map(Variable::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(vars))
    }

    /// `n` identical continuous variables on `[lower, upper)`, randomly
    /// initialised within `[init_lower, init_upper)`.
    pub fn uniform_continuous_with_initial_range(
        n: usize,
        lower: f64,
        upper: f64,
        init_lower: f64,
        init_upper: f64,
    ) -> Result<Self, VariableError> {
        let vars = (0..n)
            .map(|i| {
                VariableContinuous::named(format!("x{i}"), lower, upper)
                    .and_then(|v| v.with_initial_range(init_lower, init_upper))
                    .map(Variable::from)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(vars))
    }

    /// `n` identical integer variables on `[lower, upper]`.
    pub fn uniform_discrete(n: usize, lower: i64, upper: i64) -> Result<Self, VariableError> {
        let vars = (0..n)
            .map(|i| VariableDiscrete::named(format!("x{i}"), lower, upper).map(Variable::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(vars))
    }

    /// Number of variables.
    pub fn dimension(&self) -> usize {
        self.variables.len()
    }

    /// Variable definitions in order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Variable at `index`.
    pub fn get(&self, index: usize) -> Option<&Variable> {
        self.variables.get(index)
    }

    /// Whether every variable is continuous.
    pub fn is_continuous(&self) -> bool {
        self.variables
            .iter()
            .all(|v| matches!(v, Variable::Continuous(_)))
    }

    /// Draws a random legal vector.
    pub fn random_vector<R: Rng>(&self, rng: &mut R) -> DecisionVector {
        let values: Vec<Value> = self
            .variables
            .iter()
            .map(|v| v.get_next_random(rng))
            .collect();
        DecisionVector::from_parts(self.clone(), values)
    }
}

impl PartialEq for DecisionSpace {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.variables, &other.variables) || self.variables == other.variables
    }
}

impl FromIterator<Variable> for DecisionSpace {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        Self::new(iter)
    }
}
