//! Biased Random-Key Genetic Algorithm with online parameter control.
//!
//! - **BRKGA**: the evolutionary engine. The user implements only a
//!   decoder; elite copy, biased crossover, mutant injection, local
//!   refinement and population resizing are handled generically.
//! - **Q-learning**: a tabular controller that treats every tuple of a
//!   discrete parameter grid (population size, elite fraction, mutant
//!   fraction, crossover bias) as a state and learns, during the run,
//!   which tuple to move to next.
//!
//! # Example
//!
//! ```
//! use adaptive_brkga::brkga::{BrkgaConfig, BrkgaDecoder, BrkgaRunner, ControlMode, ParameterGrid};
//!
//! struct Sphere;
//!
//! impl BrkgaDecoder for Sphere {
//!     fn decode(&self, keys: &[f64]) -> f64 {
//!         keys.iter().map(|k| (k - 0.5).powi(2)).sum()
//!     }
//! }
//!
//! let config = BrkgaConfig::new(8)
//!     .with_grid(ParameterGrid::new(
//!         vec![20, 40],
//!         vec![0.15, 0.25],
//!         vec![0.05, 0.15],
//!         vec![0.6, 0.7],
//!     ))
//!     .with_control(ControlMode::QLearning)
//!     .with_max_generations(50)
//!     .with_seed(42);
//!
//! let result = BrkgaRunner::run(&Sphere, &config).unwrap();
//! assert!(result.best_cost <= result.cost_history[0]);
//! ```

pub mod brkga;
mod cancel;
pub mod error;
pub mod qlearning;
pub mod random;

pub use error::{BrkgaError, Result};
