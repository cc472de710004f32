//! Tabular Q-learning control of BRKGA parameters.
//!
//! Each state of the MDP is one tuple of the parameter grid; the graph is
//! complete, so an action simply names the next state. Exploration is
//! epsilon-greedy with a cosine schedule restarted at fixed fractions of
//! the budget.
//!
//! # References
//!
//! - Watkins & Dayan (1992), "Q-learning", *Machine Learning* 8, 279–292
//! - Chaves & Lorena (2021), "An adaptive and near parameter-free BRKGA
//!   using Q-learning", *IEEE CEC*

mod config;
mod controller;
mod schedule;
mod state;

pub use config::QLearningConfig;
pub use controller::QLearningController;
pub use schedule::ExplorationSchedule;
pub use state::{ParameterState, StateSpace};
