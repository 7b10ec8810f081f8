//! Fitness assignment.
//!
//! A [`FitnessCalculator`] turns evaluated individuals into comparable
//! scalar fitness values. Lower fitness is better throughout the crate.
//!
//! - [`SingleObjectiveFitness`]: solution → score → fitness transforms
//! - [`MultiObjectiveFitness`]: Pareto non-domination count with crowding
//!   distance as secondary metadata
//!
//! Illegal individuals (see [`Individual::set_illegal`]) never reach a
//! transform; they receive a [`Penalty`] instead.

pub mod multi_objective;
mod single_objective;

pub use multi_objective::MultiObjectiveFitness;
pub use single_objective::{ScoreToFitness, SingleObjectiveFitness, SolutionToScore};

use crate::management::{Individual, IndividualError, Population};
use std::sync::Arc;

/// Assigns fitness to newly evaluated individuals.
///
/// `population` holds the individuals already admitted; calculators that
/// rank candidates relative to each other (e.g. Pareto ranking) consult it.
pub trait FitnessCalculator: Send + Sync {
    fn calculate_and_assign_fitness(
        &self,
        individuals: &mut [Individual],
        population: &Population,
    ) -> Result<(), IndividualError>;
}

/// Penalty function applied to the solution vector of an illegal individual
/// (empty when no solution was recorded).
pub type PenaltyFn = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Standard penalties.
pub struct Penalty;

impl Penalty {
    /// The worst possible fitness. Optimisers minimise.
    pub const DEATH: f64 = f64::MAX;

    /// Always [`Penalty::DEATH`], whatever the solution.
    pub fn death(_solution: &[f64]) -> f64 {
        Self::DEATH
    }

    /// [`Penalty::death`] as a shareable function.
    pub fn death_fn() -> PenaltyFn {
        Arc::new(Self::death)
    }
}

/// Applies `penalty` to an illegal individual.
pub(crate) fn apply_penalty(
    individual: &mut Individual,
    penalty: &PenaltyFn,
) -> Result<(), IndividualError> {
    let value = penalty(individual.solution_vector().unwrap_or(&[]));
    individual.set_fitness_penalty(value)
}
