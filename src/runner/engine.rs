//! The ask → evaluate → tell loop.
//!
//! [`OptimiserRunner`] drives any [`Optimiser`] against an [`Evaluator`]
//! until a stop condition fires.

use super::config::RunnerConfig;
use super::types::{RunResult, StopReason};
use crate::conversion::Evaluator;
use crate::management::{Individual, IndividualError, Optimiser, OptimiserError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Executes an optimisation run.
///
/// # Usage
///
/// ```
/// use u_popopt::nelder_mead::{NelderMead, NelderMeadConfig};
/// use u_popopt::problems::Rosenbrock;
/// use u_popopt::runner::{OptimiserRunner, RunnerConfig};
/// use u_popopt::variables::{DecisionSpace, DecisionVector};
///
/// let space = DecisionSpace::uniform_continuous(2, -5.0, 5.0).unwrap();
/// let start = DecisionVector::from_continuous(&space, &[-1.2, 1.0]).unwrap();
/// let mut nm = NelderMead::new(start, &NelderMeadConfig::default()).unwrap();
///
/// let config = RunnerConfig::default().with_max_evaluations(500);
/// let result = OptimiserRunner::run(&mut nm, &Rosenbrock::new(2).unwrap(), &config).unwrap();
/// assert_eq!(result.evaluations, 500);
/// ```
pub struct OptimiserRunner;

impl OptimiserRunner {
    /// Runs until a stop condition in `config` fires or the optimiser has
    /// nothing more to propose.
    ///
    /// # Errors
    /// Invalid configuration, or any error the optimiser raises while
    /// proposing or reinserting.
    pub fn run<O, E>(
        optimiser: &mut O,
        evaluator: &E,
        config: &RunnerConfig,
    ) -> Result<RunResult, OptimiserError>
    where
        O: Optimiser + ?Sized,
        E: Evaluator + ?Sized,
    {
        Self::run_with_cancel(optimiser, evaluator, config, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next round and returns what it has so far.
    ///
    /// Each round requests at most [`Optimiser::proposal_capacity`]
    /// individuals. A failed evaluation is fatal: the whole batch goes back
    /// through [`Optimiser::re_insert`], which reports it as
    /// [`OptimiserError::EvaluationFailed`].
    pub fn run_with_cancel<O, E>(
        optimiser: &mut O,
        evaluator: &E,
        config: &RunnerConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult, OptimiserError>
    where
        O: Optimiser + ?Sized,
        E: Evaluator + ?Sized,
    {
        config.validate().map_err(OptimiserError::Config)?;

        let start = Instant::now();
        let deadline = config
            .time_limit_ms
            .map(|ms| start + Duration::from_millis(ms));
        info!(
            max_evaluations = config.max_evaluations,
            batch_size = config.batch_size,
            "optimisation run started"
        );

        let mut evaluations = 0usize;
        let mut reinserted = 0usize;
        let mut fitness_history = Vec::new();
        let mut all_evaluated = Vec::new();

        let stop_reason = loop {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                break StopReason::Cancelled;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break StopReason::TimeLimit;
            }
            if evaluations >= config.max_evaluations {
                break StopReason::MaxEvaluations;
            }

            let capacity = optimiser.proposal_capacity().unwrap_or(usize::MAX);
            let n = config
                .batch_size
                .min(config.max_evaluations - evaluations)
                .min(capacity.max(1));
            let mut batch = optimiser.get_next_to_evaluate(n)?;
            if batch.is_empty() {
                break StopReason::OptimiserFinished;
            }

            evaluate_batch(evaluator, &mut batch, config.parallel)?;
            evaluations += batch.len();
            if config.record_all {
                all_evaluated.extend(batch.iter().cloned());
            }

            if let Some(err) = batch.iter().find_map(Individual::evaluation_error) {
                warn!(error = %err, evaluations, "evaluation failed, stopping run");
            }

            reinserted += optimiser.re_insert(batch)?.inserted;

            if let Ok(best) = optimiser.population().best() {
                let fitness = best.fitness()?;
                fitness_history.push(fitness);
                if config.target_fitness.is_some_and(|t| fitness <= t) {
                    break StopReason::TargetReached;
                }
            }
        };

        let best = optimiser.population().best().ok().cloned();
        info!(
            %stop_reason,
            evaluations,
            reinserted,
            best_fitness = best.as_ref().and_then(|b| b.fitness().ok()),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "optimisation run finished"
        );

        Ok(RunResult {
            best,
            evaluations,
            reinserted,
            stop_reason,
            fitness_history,
            all_evaluated,
        })
    }
}

#[cfg(feature = "parallel")]
fn evaluate_batch<E: Evaluator + ?Sized>(
    evaluator: &E,
    batch: &mut [Individual],
    parallel: bool,
) -> Result<(), IndividualError> {
    use rayon::prelude::*;

    if parallel {
        batch
            .par_iter_mut()
            .try_for_each(|ind| evaluator.evaluate_individual(ind))
    } else {
        batch
            .iter_mut()
            .try_for_each(|ind| evaluator.evaluate_individual(ind))
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_batch<E: Evaluator + ?Sized>(
    evaluator: &E,
    batch: &mut [Individual],
    _parallel: bool,
) -> Result<(), IndividualError> {
    batch
        .iter_mut()
        .try_for_each(|ind| evaluator.evaluate_individual(ind))
}

// ============================================================================
// Tests
// ============================================================================
