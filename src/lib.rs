//! Population-based ask/tell optimisation.
//!
//! An optimiser proposes candidate decision vectors, the caller evaluates
//! them however it likes (in-process, in parallel, on another machine) and
//! hands the evaluated individuals back. The optimiser keeps a sorted
//! population and decides what to propose next.
//!
//! - **Variables** ([`variables`]): continuous, discrete and categorical
//!   variables, decision spaces and immutable decision vectors.
//! - **Management** ([`management`]): the [`Individual`](management::Individual)
//!   lifecycle, the sorted [`Population`](management::Population) and the
//!   [`Optimiser`](management::Optimiser) ask/tell loop.
//! - **Fitness** ([`fitness`]): single-objective fitness with penalties for
//!   illegal solutions, and Pareto-rank fitness for several objectives.
//! - **Conversion** ([`conversion`]): the [`Evaluator`](conversion::Evaluator)
//!   and [`Model`](conversion::Model) seams to the problem being solved.
//! - **Nelder–Mead** ([`nelder_mead`]): simplex search over continuous
//!   spaces, one proposal at a time.
//! - **Evolutionary** ([`evolutionary`]): steady-state search with
//!   pluggable mutation, recombination, reinsertion and parent selection.
//! - **Runner** ([`runner`]): drives any optimiser against an evaluator
//!   with evaluation budgets, target fitness, time limits and cancellation.
//! - **Problems** ([`problems`]): benchmark functions.
//!
//! # Quick start
//!
//! ```
//! use u_popopt::nelder_mead::{NelderMead, NelderMeadConfig};
//! use u_popopt::problems::Rosenbrock;
//! use u_popopt::runner::{OptimiserRunner, RunnerConfig};
//! use u_popopt::variables::{DecisionSpace, DecisionVector};
//!
//! let space = DecisionSpace::uniform_continuous(2, -5.0, 5.0).unwrap();
//! let start = DecisionVector::from_continuous(&space, &[-1.2, 1.0]).unwrap();
//! let config = NelderMeadConfig::default().with_convergence_tolerance(1e-10);
//! let mut nm = NelderMead::new(start, &config).unwrap();
//!
//! let result = OptimiserRunner::run(
//!     &mut nm,
//!     &Rosenbrock::new(2).unwrap(),
//!     &RunnerConfig::default(),
//! )
//! .unwrap();
//! assert!(result.best_fitness().unwrap() < 1e-4);
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluate runner batches on the rayon thread pool.
//! - `serde`: `Serialize`/`Deserialize` for configs, values and variables.

pub mod conversion;
pub mod evolutionary;
pub mod fitness;
pub mod management;
pub mod nelder_mead;
pub mod problems;
pub mod runner;
pub mod variables;
