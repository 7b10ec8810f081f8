//! Nelder–Mead configuration.

/// Configuration for the Nelder–Mead simplex search.
///
/// Coefficients follow the standard parameterisation (Nelder & Mead, 1965):
/// reflection α > 0, expansion γ > 1, contraction β in (0, 1), shrink σ in
/// (0, 1).
///
/// # Examples
///
/// ```
/// use u_popopt::nelder_mead::NelderMeadConfig;
///
/// let config = NelderMeadConfig::default()
///     .with_step_size(0.5)
///     .with_convergence_tolerance(1e-8)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NelderMeadConfig {
    /// Reflection coefficient α. Must be positive.
    pub reflection: f64,

    /// Expansion coefficient γ. Must exceed 1.
    pub expansion: f64,

    /// Outside contraction coefficient. In (0, 1).
    pub contraction_outside: f64,

    /// Inside contraction coefficient. In (0, 1).
    pub contraction_inside: f64,

    /// Shrink coefficient σ. In (0, 1).
    pub shrink: f64,

    /// Offset of the initial simplex vertices from the start point, along
    /// each axis.
    pub step_size: f64,

    /// Stop proposing once `worst - best` fitness across the simplex falls
    /// to this value. `None` = never stop on its own.
    pub convergence_tolerance: Option<f64>,

    /// Random seed, used only when the simplex must be refilled with random
    /// vertices.
    pub seed: Option<u64>,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            reflection: 1.0,
            expansion: 2.0,
            contraction_outside: 0.5,
            contraction_inside: 0.5,
            shrink: 0.5,
            step_size: 1.0,
            convergence_tolerance: None,
            seed: None,
        }
    }
}

impl NelderMeadConfig {
    pub fn with_reflection(mut self, alpha: f64) -> Self {
        self.reflection = alpha;
        self
    }

    pub fn with_expansion(mut self, gamma: f64) -> Self {
        self.expansion = gamma;
        self
    }

    pub fn with_contraction_outside(mut self, beta: f64) -> Self {
        self.contraction_outside = beta;
        self
    }

    pub fn with_contraction_inside(mut self, beta: f64) -> Self {
        self.contraction_inside = beta;
        self
    }

    pub fn with_shrink(mut self, sigma: f64) -> Self {
        self.shrink = sigma;
        self
    }

    pub fn with_step_size(mut self, step: f64) -> Self {
        self.step_size = step;
        self
    }

    pub fn with_convergence_tolerance(mut self, tol: f64) -> Self {
        self.convergence_tolerance = Some(tol);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.reflection <= 0.0 {
            return Err(format!("reflection must be positive, got {}", self.reflection));
        }
        if self.expansion <= 1.0 {
            return Err(format!("expansion must exceed 1, got {}", self.expansion));
        }
        for (name, value) in [
            ("contraction_outside", self.contraction_outside),
            ("contraction_inside", self.contraction_inside),
            ("shrink", self.shrink),
        ] {
            if value <= 0.0 || value >= 1.0 {
                return Err(format!("{name} must be in (0, 1), got {value}"));
            }
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err("step_size must be positive".into());
        }
        if let Some(tol) = self.convergence_tolerance {
            if tol < 0.0 {
                return Err("convergence_tolerance must be non-negative".into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NelderMeadConfig::default();
        assert!((config.reflection - 1.0).abs() < 1e-10);
        assert!((config.expansion - 2.0).abs() < 1e-10);
        assert!(config.convergence_tolerance.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(NelderMeadConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_expansion() {
        let config = NelderMeadConfig::default().with_expansion(1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_shrink() {
        for sigma in [-20.0, 0.0, 1.0] {
            let config = NelderMeadConfig::default().with_shrink(sigma);
            assert!(config.validate().is_err(), "shrink {sigma} should be rejected");
        }
    }

    #[test]
    fn test_validate_bad_step() {
        let config = NelderMeadConfig::default().with_step_size(0.0);
        assert!(config.validate().is_err());
    }
}
