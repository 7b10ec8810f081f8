//! Real-valued decision variable.

use super::error::VariableError;
use rand::Rng;

/// A real-valued variable on the half-open interval `[lower, upper)`.
///
/// Random values are drawn from an initialisation sub-range, which by
/// default is the full interval. Benchmark problems whose optimum sits
/// near the centre of the domain (Schwefel) narrow it to avoid trivially
/// lucky starts.
///
/// # Examples
///
/// ```
/// use u_popopt::variables::VariableContinuous;
///
/// let x = VariableContinuous::new(1.2, 4.6).unwrap();
/// assert!(x.contains(1.2));
/// assert!(!x.contains(4.6));
/// // 2.6 + 3.2 = 5.8 wraps around the upper bound
/// assert!((x.wrap_add(2.6, 3.2) - 2.4).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableContinuous {
    name: String,
    lower: f64,
    upper: f64,
    init_lower: f64,
    init_upper: f64,
}

impl VariableContinuous {
    /// Creates an unnamed variable on `[lower, upper)`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, VariableError> {
        Self::named("continuous", lower, upper)
    }

    /// Creates a named variable on `[lower, upper)`.
    ///
    /// Fails unless both bounds are finite and `lower < upper`.
    pub fn named(name: impl Into<String>, lower: f64, upper: f64) -> Result<Self, VariableError> {
        let name = name.into();
        if !lower.is_finite() || !upper.is_finite() {
            return Err(VariableError::InvalidBounds {
                name,
                reason: "bounds must be finite",
            });
        }
        if lower >= upper {
            return Err(VariableError::InvalidBounds {
                name,
                reason: "lower bound must be strictly below upper bound",
            });
        }
        Ok(Self {
            name,
            lower,
            upper,
            init_lower: lower,
            init_upper: upper,
        })
    }

    /// Restricts the range used by random initialisation.
    ///
    /// The sub-range must lie inside the variable bounds.
    pub fn with_initial_range(mut self, lower: f64, upper: f64) -> Result<Self, VariableError> {
        if lower >= upper || lower < self.lower || upper > self.upper {
            return Err(VariableError::InvalidBounds {
                name: self.name,
                reason: "initialisation range must be a non-empty sub-range of the bounds",
            });
        }
        self.init_lower = lower;
        self.init_upper = upper;
        Ok(self)
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inclusive lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Exclusive upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Whether `value` lies in `[lower, upper)`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value < self.upper
    }

    /// Adds `delta` to `value`, wrapping periodically into `[lower, upper)`.
    pub fn wrap_add(&self, value: f64, delta: f64) -> f64 {
        let range = self.upper - self.lower;
        let wrapped = (value + delta - self.lower).rem_euclid(range) + self.lower;
        // rem_euclid can round up to exactly `range`
        if wrapped >= self.upper {
            self.lower
        } else {
            wrapped
        }
    }

    /// Clamps `value` to the closest location inside the bounds.
    pub fn nearest_legal_location(&self, value: f64) -> f64 {
        if value < self.lower {
            self.lower
        } else if value >= self.upper {
            self.upper - (self.upper - self.lower) * 1e-12
        } else {
            value
        }
    }

    /// Draws a value uniformly from the initialisation range.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.init_lower..self.init_upper)
    }

    /// Evenly spaced points from lower to upper bound, both included.
    pub fn spaced_points(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.lower],
            n => {
                let step = (self.upper - self.lower) / (n - 1) as f64;
                (0..n).map(|i| self.lower + step * i as f64).collect()
            }
        }
    }
}
