//! Evolutionary algorithm configuration.

use super::selection::Selection;

/// Configuration for the steady-state evolutionary algorithm.
///
/// # Defaults
///
/// ```
/// use u_popopt::evolutionary::EvolutionaryConfig;
///
/// let config = EvolutionaryConfig::default();
/// assert_eq!(config.population_size, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_popopt::evolutionary::{EvolutionaryConfig, Selection};
///
/// let config = EvolutionaryConfig::default()
///     .with_population_size(50)
///     .with_selection(Selection::Tournament(5))
///     .with_crossover_rate(0.8)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionaryConfig {
    /// Target population size. Proposals are random until it is reached.
    pub population_size: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Probability of recombining the selected parents (0.0–1.0).
    ///
    /// When recombination is skipped, the first parent is copied.
    pub crossover_rate: f64,

    /// Probability of applying the mutation operator to a child (0.0–1.0).
    pub mutation_rate: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionaryConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            selection: Selection::default(),
            crossover_rate: 0.9,
            mutation_rate: 1.0,
            seed: None,
        }
    }
}

impl EvolutionaryConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Convenience builder for setting tournament size.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err("crossover_rate must be in [0, 1]".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be in [0, 1]".into());
        }
        if self.selection == Selection::Tournament(0) {
            return Err("tournament size must be at least 1".into());
        }
        Ok(())
    }
}
