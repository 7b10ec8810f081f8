//! Steady-state evolutionary search.
//!
//! [`EvolutionaryAlgorithm`] plugs three kinds of operator into the
//! ask/tell loop:
//!
//! - [`MutationOperator`]: [`MutationRandomSwap`], [`MutationAddRandomNumber`],
//!   [`MutationAddRandomNumberFromSet`]
//! - [`RecombinationOperator`]: [`CrossoverArithmeticMultiParent`],
//!   [`CrossoverMultiPoint`]
//! - [`ReinsertionOperator`]: [`ReinsertionReplaceWorst`]
//!
//! Parents are chosen with [`Selection`]. Operators never modify their
//! inputs and take the random source as `&mut dyn RngCore`, so they can be
//! stored as trait objects.

mod config;
mod mutation;
mod optimiser;
mod recombination;
mod reinsertion;
mod selection;

pub use config::EvolutionaryConfig;
pub use mutation::{
    MutationAddRandomNumber, MutationAddRandomNumberFromSet, MutationOperator, MutationRandomSwap,
};
pub use optimiser::EvolutionaryAlgorithm;
pub use recombination::{CrossoverArithmeticMultiParent, CrossoverMultiPoint, RecombinationOperator};
pub use reinsertion::{ReinsertionOperator, ReinsertionReplaceWorst};
pub use selection::Selection;
