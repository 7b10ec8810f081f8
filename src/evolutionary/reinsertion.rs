//! Reinsertion: deciding which evaluated children join the population.

use crate::management::{Individual, Population, PopulationError};
use std::fmt;

/// Offers one evaluated individual to the population.
pub trait ReinsertionOperator: Send + Sync + fmt::Debug {
    /// Returns whether the individual was admitted.
    fn reinsert(
        &self,
        population: &mut Population,
        individual: Individual,
    ) -> Result<bool, PopulationError>;
}

/// Fills the population to its target size, then replaces the worst member
/// with any individual of strictly lower fitness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReinsertionReplaceWorst;

impl ReinsertionOperator for ReinsertionReplaceWorst {
    fn reinsert(
        &self,
        population: &mut Population,
        individual: Individual,
    ) -> Result<bool, PopulationError> {
        if !population.is_target_size_reached() {
            population.add_individual(individual)?;
            return Ok(true);
        }

        let candidate = individual.fitness().map_err(|_| PopulationError::FitnessMissing)?;
        let worst = population.worst()?.fitness().unwrap_or(f64::INFINITY);
        if candidate >= worst {
            return Ok(false);
        }

        population.replace_worst(individual)?;
        // The newcomer sits in the last slot; re-adding restores order.
        let newcomer = population.remove_worst()?;
        population.add_individual(newcomer)?;
        Ok(true)
    }
}
