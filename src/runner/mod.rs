//! Driving an optimiser against an evaluator.
//!
//! [`OptimiserRunner`] repeats ask → evaluate → tell until the budget,
//! target, time limit or cancellation flag stops it, or the optimiser runs
//! out of proposals. With the `parallel` feature each batch is evaluated on
//! the rayon thread pool.

mod config;
mod engine;
mod types;

pub use config::RunnerConfig;
pub use engine::OptimiserRunner;
pub use types::{RunResult, StopReason};
