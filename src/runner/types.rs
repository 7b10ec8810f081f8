//! Run outcome types.

use crate::management::Individual;
use std::fmt;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The optimiser returned an empty batch: it has nothing more to propose.
    OptimiserFinished,
    /// `max_evaluations` individuals were evaluated.
    MaxEvaluations,
    /// The best fitness reached `target_fitness`.
    TargetReached,
    /// The wall-clock limit passed.
    TimeLimit,
    /// The cancellation flag was set.
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::OptimiserFinished => "optimiser finished",
            StopReason::MaxEvaluations => "evaluation budget spent",
            StopReason::TargetReached => "target fitness reached",
            StopReason::TimeLimit => "time limit reached",
            StopReason::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Result of an optimiser run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Best member of the population when the run ended.
    pub best: Option<Individual>,

    /// Individuals evaluated, including those later rejected.
    pub evaluations: usize,

    /// Individuals the optimiser admitted to its population.
    pub reinserted: usize,

    pub stop_reason: StopReason,

    /// Best fitness after each round.
    pub fitness_history: Vec<f64>,

    /// Every evaluated individual, in evaluation order. Empty unless
    /// `record_all` is set.
    pub all_evaluated: Vec<Individual>,
}

impl RunResult {
    /// Fitness of [`best`](Self::best), if any.
    pub fn best_fitness(&self) -> Option<f64> {
        self.best.as_ref().and_then(|b| b.fitness().ok())
    }
}
