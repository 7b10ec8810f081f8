//! Fitness-sorted collection of evaluated individuals.

use super::errors::PopulationError;
use super::individual::{Individual, IndividualState};
use crate::variables::DecisionVector;

/// Evaluated individuals kept in ascending fitness order.
///
/// Index 0 is the best (lowest fitness); the last member is the worst.
///
/// # Invariants
///
/// - Only `Evaluated` individuals with an assigned fitness are admitted.
/// - With `constant_length` set, every decision vector has the length of the
///   first member.
/// - Members are sorted after every [`add_individual`](Self::add_individual).
///   Equal fitnesses keep insertion order.
///
/// The target size is a hint for strategies; insertion never fails because
/// the population is full.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Individual>,
    target_size: usize,
    constant_length: bool,
}

impl Default for Population {
    fn default() -> Self {
        Self::new(100, true)
    }
}

impl Population {
    /// Creates an empty population.
    pub fn new(target_size: usize, constant_length: bool) -> Self {
        Self {
            members: Vec::with_capacity(target_size),
            target_size,
            constant_length,
        }
    }

    /// Creates a population from an initial batch, each member admitted
    /// through [`add_individual`](Self::add_individual).
    pub fn with_members(
        target_size: usize,
        members: impl IntoIterator<Item = Individual>,
        constant_length: bool,
    ) -> Result<Self, PopulationError> {
        let mut population = Self::new(target_size, constant_length);
        for ind in members {
            population.add_individual(ind)?;
        }
        Ok(population)
    }

    /// Advisory target size.
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Whether the population holds at least its target size.
    pub fn is_target_size_reached(&self) -> bool {
        self.members.len() >= self.target_size
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Admits an evaluated individual and restores fitness order.
    ///
    /// On failure the population is left unchanged.
    pub fn add_individual(&mut self, individual: Individual) -> Result<(), PopulationError> {
        self.check_admissible(&individual)?;
        self.members.push(individual);
        self.sort();
        Ok(())
    }

    /// Overwrites the worst member without re-sorting.
    ///
    /// The caller decides whether order must be restored; see
    /// [`ReinsertionReplaceWorst`](crate::evolutionary::ReinsertionReplaceWorst).
    pub fn replace_worst(&mut self, individual: Individual) -> Result<Individual, PopulationError> {
        if self.members.is_empty() {
            return Err(PopulationError::Empty);
        }
        self.check_admissible(&individual)?;
        let last = self.members.len() - 1;
        Ok(std::mem::replace(&mut self.members[last], individual))
    }

    /// Removes and returns the worst member.
    pub fn remove_worst(&mut self) -> Result<Individual, PopulationError> {
        self.members.pop().ok_or(PopulationError::Empty)
    }

    /// The lowest-fitness member.
    pub fn best(&self) -> Result<&Individual, PopulationError> {
        self.members.first().ok_or(PopulationError::Empty)
    }

    /// The highest-fitness member.
    pub fn worst(&self) -> Result<&Individual, PopulationError> {
        self.members.last().ok_or(PopulationError::Empty)
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.members.get(index)
    }

    /// Members in fitness order.
    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[Individual] {
        &self.members
    }

    /// Whether a member sits at the same decision vector.
    pub fn contains(&self, decision_vector: &DecisionVector) -> bool {
        self.members
            .iter()
            .any(|m| m.decision_vector() == decision_vector)
    }

    /// Fitness of each member, best first.
    pub fn fitnesses(&self) -> Vec<f64> {
        self.members
            .iter()
            .filter_map(|m| m.fitness().ok())
            .collect()
    }

    /// Score of each member that has one.
    pub fn scores(&self) -> Vec<Vec<f64>> {
        self.members
            .iter()
            .filter_map(|m| m.score().ok().map(<[f64]>::to_vec))
            .collect()
    }

    /// Solution vector of each member that has one.
    pub fn solution_vectors(&self) -> Vec<Vec<f64>> {
        self.members
            .iter()
            .filter_map(|m| m.solution_vector().ok().map(<[f64]>::to_vec))
            .collect()
    }

    /// Decision vector of each member.
    pub fn decision_vectors(&self) -> Vec<DecisionVector> {
        self.members
            .iter()
            .map(|m| m.decision_vector().clone())
            .collect()
    }

    fn check_admissible(&self, individual: &Individual) -> Result<(), PopulationError> {
        if self.constant_length {
            if let Some(first) = self.members.first() {
                let expected = first.decision_vector().len();
                let found = individual.decision_vector().len();
                if expected != found {
                    return Err(PopulationError::LengthMismatch { expected, found });
                }
            }
        }
        if individual.state() != IndividualState::Evaluated {
            return Err(PopulationError::NotEvaluated {
                state: individual.state(),
            });
        }
        if individual.fitness().is_err() {
            return Err(PopulationError::FitnessMissing);
        }
        Ok(())
    }

    fn sort(&mut self) {
        // Every member passed `check_admissible`, so fitness is present.
        self.members.sort_by(|a, b| {
            let fa = a.fitness().unwrap_or(f64::INFINITY);
            let fb = b.fitness().unwrap_or(f64::INFINITY);
            fa.total_cmp(&fb)
        });
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
