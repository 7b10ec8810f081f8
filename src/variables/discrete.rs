//! Integer decision variable.

use super::error::VariableError;
use rand::Rng;

/// An integer variable on the closed interval `[lower, upper]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableDiscrete {
    name: String,
    lower: i64,
    upper: i64,
}

impl VariableDiscrete {
    /// Creates an unnamed variable on `[lower, upper]`.
    pub fn new(lower: i64, upper: i64) -> Result<Self, VariableError> {
        Self::named("discrete", lower, upper)
    }

    /// Creates a named variable on `[lower, upper]`.
    pub fn named(name: impl Into<String>, lower: i64, upper: i64) -> Result<Self, VariableError> {
        let name = name.into();
        if lower > upper {
            return Err(VariableError::InvalidBounds {
                name,
                reason: "lower bound must not exceed upper bound",
            });
        }
        Ok(Self { name, lower, upper })
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inclusive lower bound.
    pub fn lower(&self) -> i64 {
        self.lower
    }

    /// Inclusive upper bound.
    pub fn upper(&self) -> i64 {
        self.upper
    }

    /// Number of admissible values. Wider than `i64` so the full integer
    /// range can be represented.
    pub fn domain_size(&self) -> i128 {
        i128::from(self.upper) - i128::from(self.lower) + 1
    }

    /// Whether `value` lies in `[lower, upper]`.
    pub fn contains(&self, value: i64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    /// Adds `delta` to `value`, wrapping modulo the domain size.
    ///
    /// `value` need not be in bounds; the result always is.
    pub fn wrap_add(&self, value: i64, delta: i64) -> i64 {
        let lower = i128::from(self.lower);
        let offset = i128::from(value) - lower + i128::from(delta);
        let wrapped = lower + offset.rem_euclid(self.domain_size());
        // within [lower, upper]
        wrapped as i64
    }

    /// Draws a value uniformly from the domain.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> i64 {
        rng.random_range(self.lower..=self.upper)
    }
}
