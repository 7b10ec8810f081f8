//! The ask/tell optimisation loop.
//!
//! An [`Optimiser`] proposes candidates with
//! [`get_next_to_evaluate`](Optimiser::get_next_to_evaluate), the caller
//! evaluates them externally, and hands them back with
//! [`re_insert`](Optimiser::re_insert). The population is only read or
//! written inside `re_insert`, so a batch may be evaluated concurrently.
//!
//! Strategies implement [`Optimiser::get_new_decision_vector`] and own an
//! [`OptimiserCore`]; the loop itself is provided.

use super::errors::OptimiserError;
use super::individual::{Individual, IndividualState};
use super::population::Population;
use crate::fitness::FitnessCalculator;
use crate::variables::DecisionVector;
use tracing::{debug, trace};

/// Extra proposal attempts allowed beyond the number requested.
pub const PROPOSAL_RETRY_MARGIN: usize = 20;

/// Reason recorded on an individual rejected as a duplicate.
pub const DUPLICATE_REJECTION: &str = "decision vector already present in the population";

/// Bookkeeping every strategy carries: the population, the fitness
/// calculator and the proposal counter.
pub struct OptimiserCore {
    population: Population,
    fitness_calculator: Box<dyn FitnessCalculator>,
    proposed: usize,
}

impl OptimiserCore {
    pub fn new(population: Population, fitness_calculator: Box<dyn FitnessCalculator>) -> Self {
        Self {
            population,
            fitness_calculator,
            proposed: 0,
        }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    pub fn fitness_calculator(&self) -> &dyn FitnessCalculator {
        self.fitness_calculator.as_ref()
    }

    /// Number of individuals proposed so far.
    pub fn proposed(&self) -> usize {
        self.proposed
    }

    /// Assigns fitness to `individuals` against the current population.
    pub fn assign_fitness(&self, individuals: &mut [Individual]) -> Result<(), OptimiserError> {
        if individuals.is_empty() {
            return Ok(());
        }
        self.fitness_calculator
            .calculate_and_assign_fitness(individuals, &self.population)?;
        Ok(())
    }

    /// Assigns fitness to `individuals` and admits each one.
    pub fn assign_fitness_and_admit(
        &mut self,
        mut individuals: Vec<Individual>,
    ) -> Result<usize, OptimiserError> {
        self.assign_fitness(&mut individuals)?;
        let count = individuals.len();
        for ind in individuals {
            self.population
                .add_individual(ind)
                .map_err(OptimiserError::Reinsertion)?;
        }
        Ok(count)
    }

    fn next_index(&mut self) -> usize {
        let index = self.proposed;
        self.proposed += 1;
        index
    }
}

impl std::fmt::Debug for OptimiserCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimiserCore")
            .field("population", &self.population.len())
            .field("proposed", &self.proposed)
            .finish_non_exhaustive()
    }
}

/// Outcome of one [`Optimiser::re_insert`] call.
#[derive(Debug, Default)]
pub struct ReInsertion {
    /// How many individuals the strategy admitted to its population.
    pub inserted: usize,
    /// Individuals skipped as duplicates, each carrying a reinsertion error.
    pub rejected: Vec<Individual>,
}

/// A population-based search strategy.
///
/// # Implementing
///
/// Provide access to an [`OptimiserCore`] and a way to propose the next
/// decision vector. Returning [`DecisionVector::empty`] signals that the
/// strategy has nothing more to propose; returning an error makes the loop
/// retry.
///
/// ```ignore
/// struct RandomSearch { core: OptimiserCore, space: DecisionSpace, rng: StdRng }
///
/// impl Optimiser for RandomSearch {
///     fn core(&self) -> &OptimiserCore { &self.core }
///     fn core_mut(&mut self) -> &mut OptimiserCore { &mut self.core }
///     fn get_new_decision_vector(&mut self) -> Result<DecisionVector, OptimiserError> {
///         Ok(self.space.random_vector(&mut self.rng))
///     }
/// }
/// ```
pub trait Optimiser: Send {
    fn core(&self) -> &OptimiserCore;

    fn core_mut(&mut self) -> &mut OptimiserCore;

    /// Proposes one decision vector.
    fn get_new_decision_vector(&mut self) -> Result<DecisionVector, OptimiserError>;

    /// Assigns fitness to the accepted batch and decides what enters the
    /// population. Returns the number admitted.
    ///
    /// The default admits every individual.
    fn assess_fitness_and_decide_fate(
        &mut self,
        individuals: Vec<Individual>,
    ) -> Result<usize, OptimiserError> {
        self.core_mut().assign_fitness_and_admit(individuals)
    }

    /// Called for each individual rejected during reinsertion.
    fn on_reinsertion_rejected(&mut self, _individual: &Individual) {}

    /// How many proposals the strategy can hand out right now without
    /// waiting for earlier ones to come back. `None` means no limit.
    ///
    /// Drivers that request batches should not ask for more than this.
    fn proposal_capacity(&self) -> Option<usize> {
        None
    }

    fn population(&self) -> &Population {
        self.core().population()
    }

    fn population_mut(&mut self) -> &mut Population {
        self.core_mut().population_mut()
    }

    fn fitness_calculator(&self) -> &dyn FitnessCalculator {
        self.core().fitness_calculator()
    }

    /// Proposes up to `n` new individuals.
    ///
    /// Proposal failures are retried; at most `n + 20` attempts are made
    /// before failing with [`OptimiserError::Exhausted`]. An empty decision
    /// vector stops the call early, so a short (or empty) batch means the
    /// strategy has finished.
    fn get_next_to_evaluate(&mut self, n: usize) -> Result<Vec<Individual>, OptimiserError> {
        let max_attempts = n + PROPOSAL_RETRY_MARGIN;
        let mut batch = Vec::with_capacity(n);
        let mut attempts = 0;

        while batch.len() < n {
            if attempts >= max_attempts {
                return Err(OptimiserError::Exhausted {
                    requested: n,
                    created: batch.len(),
                    attempts,
                });
            }
            attempts += 1;

            match self.get_new_decision_vector() {
                Ok(dv) if dv.is_empty() => {
                    debug!(created = batch.len(), "strategy has no further proposals");
                    break;
                }
                Ok(dv) => {
                    let mut ind = Individual::new(dv);
                    let index = self.core_mut().next_index();
                    ind.stamp_creation(index);
                    batch.push(ind);
                }
                Err(e) => trace!(error = %e, attempts, "proposal failed, retrying"),
            }
        }

        Ok(batch)
    }

    /// Hands evaluated individuals back to the strategy.
    ///
    /// Processes the batch in order. A candidate that is not `Evaluated`, or
    /// that carries an evaluation error, aborts the call. A candidate whose
    /// decision vector is already in the population (or earlier in the
    /// batch) is rejected and returned in [`ReInsertion::rejected`]. The rest
    /// go to [`assess_fitness_and_decide_fate`](Self::assess_fitness_and_decide_fate).
    fn re_insert(&mut self, individuals: Vec<Individual>) -> Result<ReInsertion, OptimiserError> {
        let mut accepted: Vec<Individual> = Vec::with_capacity(individuals.len());
        let mut rejected = Vec::new();

        for mut ind in individuals {
            if ind.state() != IndividualState::Evaluated {
                return Err(OptimiserError::NotEvaluated { state: ind.state() });
            }
            if let Some(err) = ind.evaluation_error() {
                return Err(OptimiserError::EvaluationFailed(err.clone()));
            }

            ind.stamp_reinsertion();

            let duplicate = self.population().contains(ind.decision_vector())
                || accepted.iter().any(|a| a == &ind);
            if duplicate {
                debug!(decision_vector = %ind.decision_vector(), "rejected duplicate on reinsertion");
                ind.set_reinsertion_error(DUPLICATE_REJECTION);
                self.on_reinsertion_rejected(&ind);
                rejected.push(ind);
                continue;
            }

            accepted.push(ind);
        }

        let inserted = self.assess_fitness_and_decide_fate(accepted)?;
        debug!(inserted, rejected = rejected.len(), "reinsertion complete");
        Ok(ReInsertion { inserted, rejected })
    }
}

// ============================================================================
// Tests
// ============================================================================
