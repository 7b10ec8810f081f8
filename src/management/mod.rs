//! Optimisation engine: candidate lifecycle, population, and the ask/tell
//! loop.
//!
//! # Key Types
//!
//! - [`Individual`]: one decision vector with its evaluation state and metrics
//! - [`Population`]: evaluated individuals sorted by fitness, best first
//! - [`Optimiser`]: the ask/tell trait every strategy implements
//! - [`OptimiserCore`]: population + fitness calculator shared by strategies
//!
//! # Lifecycle
//!
//! ```text
//! get_next_to_evaluate ──▶ (caller evaluates) ──▶ re_insert ──▶ FitnessCalculator ──▶ Population
//! ```

mod errors;
mod individual;
mod optimiser;
mod population;

pub use errors::{IndividualError, OperatorError, OptimiserError, PopulationError};
pub use individual::{Individual, IndividualState, PropertyType, PropertyValue};
pub use optimiser::{
    Optimiser, OptimiserCore, ReInsertion, DUPLICATE_REJECTION, PROPOSAL_RETRY_MARGIN,
};
pub use population::Population;
