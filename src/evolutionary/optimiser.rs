//! Steady-state evolutionary search.

use super::config::EvolutionaryConfig;
use super::mutation::MutationOperator;
use super::recombination::RecombinationOperator;
use super::reinsertion::{ReinsertionOperator, ReinsertionReplaceWorst};
use super::selection::Selection;
use crate::fitness::{FitnessCalculator, SingleObjectiveFitness};
use crate::management::{
    Individual, Optimiser, OptimiserCore, OptimiserError, Population,
};
use crate::variables::{DecisionSpace, DecisionVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// A steady-state evolutionary algorithm.
///
/// Until the population reaches its target size every proposal is a random
/// point of the decision space. After that, each proposal is a child of
/// parents picked by [`Selection`]: recombined with probability
/// `crossover_rate` (otherwise a copy of the first parent), then mutated
/// with probability `mutation_rate`. Returned children are offered to the
/// population one at a time through the reinsertion operator.
///
/// # Examples
///
/// ```
/// use u_popopt::evolutionary::{EvolutionaryAlgorithm, EvolutionaryConfig, MutationAddRandomNumber};
/// use u_popopt::management::Optimiser;
/// use u_popopt::variables::DecisionSpace;
///
/// let space = DecisionSpace::uniform_continuous(3, -5.0, 5.0).unwrap();
/// let config = EvolutionaryConfig::default().with_population_size(20).with_seed(1);
/// let mutation = MutationAddRandomNumber::new(0.5, 1.0, 1).unwrap();
/// let mut ea = EvolutionaryAlgorithm::new(space, &config, mutation).unwrap();
///
/// let batch = ea.get_next_to_evaluate(20).unwrap();
/// assert_eq!(batch.len(), 20);
/// ```
#[derive(Debug)]
pub struct EvolutionaryAlgorithm {
    core: OptimiserCore,
    space: DecisionSpace,
    selection: Selection,
    crossover_rate: f64,
    mutation_rate: f64,
    mutation: Box<dyn MutationOperator>,
    recombination: Option<Box<dyn RecombinationOperator>>,
    reinsertion: Box<dyn ReinsertionOperator>,
    rng: StdRng,
}

impl EvolutionaryAlgorithm {
    /// Creates a search over `space` using single-objective fitness,
    /// replace-worst reinsertion and no recombination.
    pub fn new(
        space: DecisionSpace,
        config: &EvolutionaryConfig,
        mutation: impl MutationOperator + 'static,
    ) -> Result<Self, OptimiserError> {
        config.validate().map_err(OptimiserError::Config)?;
        if space.dimension() == 0 {
            return Err(OptimiserError::Config(
                "decision space must have at least one variable".into(),
            ));
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            core: OptimiserCore::new(
                Population::new(config.population_size, true),
                Box::new(SingleObjectiveFitness::default()),
            ),
            space,
            selection: config.selection,
            crossover_rate: config.crossover_rate,
            mutation_rate: config.mutation_rate,
            mutation: Box::new(mutation),
            recombination: None,
            reinsertion: Box::new(ReinsertionReplaceWorst),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Sets the recombination operator.
    pub fn with_recombination(mut self, recombination: impl RecombinationOperator + 'static) -> Self {
        self.recombination = Some(Box::new(recombination));
        self
    }

    /// Sets the reinsertion operator.
    pub fn with_reinsertion(mut self, reinsertion: impl ReinsertionOperator + 'static) -> Self {
        self.reinsertion = Box::new(reinsertion);
        self
    }

    /// Replaces the fitness calculator. Call before the first proposal.
    pub fn with_fitness_calculator(mut self, calculator: impl FitnessCalculator + 'static) -> Self {
        let target = self.core.population().target_size();
        self.core = OptimiserCore::new(Population::new(target, true), Box::new(calculator));
        self
    }

    pub fn space(&self) -> &DecisionSpace {
        &self.space
    }

    fn select_parents(&mut self, count: usize) -> Result<Vec<DecisionVector>, OptimiserError> {
        let population = self.core.population();
        (0..count)
            .map(|_| {
                let index = self
                    .selection
                    .select(population, &mut self.rng)
                    .map_err(OptimiserError::Reinsertion)?;
                Ok(population.as_slice()[index].decision_vector().clone())
            })
            .collect()
    }

    fn breed(&mut self) -> Result<DecisionVector, OptimiserError> {
        let recombine = self.recombination.is_some() && self.rng.random_bool(self.crossover_rate);
        let parent_count = match (&self.recombination, recombine) {
            (Some(r), true) => r.parent_count(),
            _ => 1,
        };
        let parents = self.select_parents(parent_count)?;

        let mut child = match (&self.recombination, recombine) {
            (Some(r), true) => r.operate(&parents, &mut self.rng)?,
            _ => parents[0].clone(),
        };
        if self.rng.random_bool(self.mutation_rate) {
            child = self.mutation.operate(&child, &mut self.rng)?;
        }
        Ok(child)
    }
}

impl Optimiser for EvolutionaryAlgorithm {
    fn core(&self) -> &OptimiserCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut OptimiserCore {
        &mut self.core
    }

    fn get_new_decision_vector(&mut self) -> Result<DecisionVector, OptimiserError> {
        if !self.core.population().is_target_size_reached() {
            return Ok(self.space.random_vector(&mut self.rng));
        }
        self.breed()
    }

    fn assess_fitness_and_decide_fate(
        &mut self,
        mut individuals: Vec<Individual>,
    ) -> Result<usize, OptimiserError> {
        self.core.assign_fitness(&mut individuals)?;

        let mut admitted = 0;
        for ind in individuals {
            let accepted = self
                .reinsertion
                .reinsert(self.core.population_mut(), ind)
                .map_err(OptimiserError::Reinsertion)?;
            if accepted {
                admitted += 1;
            }
        }
        debug!(
            admitted,
            population = self.core.population().len(),
            "evolutionary reinsertion"
        );
        Ok(admitted)
    }
}

// ============================================================================
// Tests
// ============================================================================
