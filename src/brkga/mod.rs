//! Biased Random-Key Genetic Algorithm (BRKGA).
//!
//! BRKGA separates the evolutionary engine from the problem by using a
//! random-key representation: chromosomes are vectors of `f64` in `[0, 1)`,
//! and a user-provided **decoder** maps keys to a cost.
//!
//! The engine handles population management (elite copy, biased
//! crossover, mutant injection, resizing). Parameters are either fixed
//! ([`ControlMode::Offline`]) or chosen every generation by a
//! [`crate::qlearning::QLearningController`] ([`ControlMode::QLearning`]).
//!
//! # References
//!
//! - Bean (1994), "Genetic algorithms and random keys for sequencing and optimization"
//! - Goncalves & Resende (2011), "Biased random-key genetic algorithms for
//!   combinatorial optimization", *J. Heuristics* 17(5), 487–525

mod archive;
mod chromosome;
mod clock;
mod config;
mod crossover;
mod generation;
mod params;
mod population;
mod runner;
mod types;

pub use archive::{EliteArchive, NoArchive, SolutionPool};
pub use chromosome::{sort_by_fitness, Chromosome};
pub use clock::{Clock, SystemClock};
pub use config::{BrkgaConfig, ControlMode};
pub use crossover::{mate, parametric_uniform_crossover};
pub use generation::{evolve, GenerationOutcome};
pub use params::{BrkgaParams, ParameterGrid};
pub use population::{Population, ResizeOutcome};
pub use runner::{BrkgaResult, BrkgaRunner};
pub use types::{BrkgaDecoder, KeyPerturbation, LocalSearch, NoLocalSearch};
