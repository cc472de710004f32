//! Exploration and learning-rate schedules driven by budget progress.
//!
//! Epsilon uses cosine annealing with warm restarts:
//!
//! `eps = eps_min + 0.5 * (ceiling - eps_min) * (1 + cos(pi * t / T))`
//!
//! where `t` is the progress elapsed in the current epoch and `T` the epoch
//! length. Each restart lowers the ceiling.

use super::config::QLearningConfig;
use std::f64::consts::PI;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ExplorationSchedule {
    ceiling: f64,
    epsilon_min: f64,
    restart_decay: f64,
    period: f64,
    learning_rate_start: f64,
    learning_rate_end: f64,
    epoch: usize,
}

impl ExplorationSchedule {
    pub fn new(config: &QLearningConfig) -> Self {
        Self {
            ceiling: config.epsilon_max,
            epsilon_min: config.epsilon_min,
            restart_decay: config.epsilon_restart_decay,
            period: config.restart_period,
            learning_rate_start: config.learning_rate_start,
            learning_rate_end: config.learning_rate_end,
            epoch: 0,
        }
    }

    /// Number of restarts performed so far.
    pub fn restarts(&self) -> usize {
        self.epoch
    }

    /// Current epsilon ceiling.
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Epsilon at `progress` (fraction of the budget, clamped to [0, 1]).
    ///
    /// Crossing one or more epoch boundaries restarts the schedule once per
    /// boundary. `progress` is expected to be non-decreasing across calls.
    pub fn epsilon(&mut self, progress: f64) -> f64 {
        let progress = progress.clamp(0.0, 1.0);
        while progress >= (self.epoch + 1) as f64 * self.period {
            self.epoch += 1;
            self.ceiling = (self.ceiling - self.restart_decay).max(self.epsilon_min);
            debug!(
                restart = self.epoch,
                ceiling = self.ceiling,
                progress,
                "exploration restart"
            );
        }

        let within = ((progress - self.epoch as f64 * self.period) / self.period).clamp(0.0, 1.0);
        self.epsilon_min + 0.5 * (self.ceiling - self.epsilon_min) * (1.0 + (PI * within).cos())
    }

    /// Learning rate at `progress`, linear from start to end.
    pub fn learning_rate(&self, progress: f64) -> f64 {
        let progress = progress.clamp(0.0, 1.0);
        self.learning_rate_start + (self.learning_rate_end - self.learning_rate_start) * progress
    }
}
