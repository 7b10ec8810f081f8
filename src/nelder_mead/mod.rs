//! Nelder–Mead simplex search.
//!
//! A derivative-free local search over continuous decision spaces. The
//! search keeps a simplex of `n + 1` vertices and repeatedly replaces the
//! worst one by reflecting, expanding or contracting it through the
//! centroid of the rest, shrinking the whole simplex towards the best
//! vertex when none of those moves helps.
//!
//! # Key Types
//!
//! - [`NelderMeadConfig`]: coefficients, initial step, convergence tolerance
//! - [`Simplex`]: evaluated vertices ordered best to worst
//! - [`SimplexOperator`]: the pure moves ([`Reflect`], [`Expand`],
//!   [`ContractOutside`], [`ContractInside`], [`Shrink`]) plus [`mean`]
//! - [`NelderMeadSteps`]: which moves an iteration tried and kept
//! - [`NelderMead`]: the ask/tell optimiser
//!
//! # References
//!
//! - Nelder & Mead (1965), "A Simplex Method for Function Minimization",
//!   The Computer Journal 7(4), 308-313
//! - Lagarias et al. (1998), "Convergence Properties of the Nelder-Mead
//!   Simplex Method in Low Dimensions", SIAM J. Optim. 9(1), 112-147

mod config;
pub mod operators;
mod optimiser;
mod simplex;
mod steps;

pub use config::NelderMeadConfig;
pub use operators::{
    mean, ContractInside, ContractOutside, Expand, Reflect, Shrink, SimplexOperator,
};
pub use optimiser::NelderMead;
pub use simplex::Simplex;
pub use steps::NelderMeadSteps;
