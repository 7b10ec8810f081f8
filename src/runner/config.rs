//! Runner configuration.

/// Termination and batching settings for [`OptimiserRunner`](super::OptimiserRunner).
///
/// # Examples
///
/// ```
/// use u_popopt::runner::RunnerConfig;
///
/// let config = RunnerConfig::default()
///     .with_max_evaluations(5_000)
///     .with_batch_size(8)
///     .with_target_fitness(1e-6)
///     .with_time_limit_ms(2_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunnerConfig {
    /// Stop once this many individuals have been evaluated.
    pub max_evaluations: usize,

    /// Most individuals requested from the optimiser per round.
    ///
    /// Rounds are smaller when the optimiser's
    /// [`proposal_capacity`](crate::management::Optimiser::proposal_capacity)
    /// is lower, as it is for Nelder–Mead between simplex moves.
    pub batch_size: usize,

    /// Stop as soon as the best fitness is at or below this value.
    pub target_fitness: Option<f64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked before each round, so the actual runtime may exceed the
    /// limit by one round's worth of evaluation.
    pub time_limit_ms: Option<u64>,

    /// Evaluate each batch in parallel with rayon.
    ///
    /// Only takes effect with the `parallel` feature.
    pub parallel: bool,

    /// Keep a copy of every evaluated individual in
    /// [`RunResult::all_evaluated`](super::RunResult::all_evaluated).
    pub record_all: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_evaluations: 10_000,
            batch_size: 1,
            target_fitness: None,
            time_limit_ms: None,
            parallel: true,
            record_all: false,
        }
    }
}

impl RunnerConfig {
    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }

    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    pub fn with_target_fitness(mut self, target: f64) -> Self {
        self.target_fitness = Some(target);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_record_all(mut self, record: bool) -> Self {
        self.record_all = record;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_evaluations == 0 {
            return Err("max_evaluations must be at least 1".into());
        }
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        if let Some(target) = self.target_fitness {
            if target.is_nan() {
                return Err("target_fitness must not be NaN".into());
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
        let config = RunnerConfig::default();
        assert_eq!(config.max_evaluations, 10_000);
        assert_eq!(config.batch_size, 1);
        assert!(config.target_fitness.is_none());
        assert!(config.time_limit_ms.is_none());
        assert!(config.parallel);
        assert!(!config.record_all);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RunnerConfig::default()
            .with_max_evaluations(50)
            .with_batch_size(4)
            .with_target_fitness(0.5)
            .with_time_limit_ms(100)
            .with_parallel(false)
            .with_record_all(true);
        assert_eq!(config.max_evaluations, 50);
        assert_eq!(config.batch_size, 4);
        assert_eq!(config.target_fitness, Some(0.5));
        assert_eq!(config.time_limit_ms, Some(100));
        assert!(!config.parallel);
        assert!(config.record_all);
    }

    #[test]
    fn test_validate() {
        assert!(RunnerConfig::default().validate().is_ok());
        assert!(RunnerConfig::default().with_batch_size(0).validate().is_err());
        assert!(RunnerConfig::default()
            .with_max_evaluations(0)
            .validate()
            .is_err());
        assert!(RunnerConfig::default()
            .with_time_limit_ms(0)
            .validate()
            .is_err());
    }
}
