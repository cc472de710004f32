//! Q-learning controller configuration.

use crate::error::{BrkgaError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings of the exploration schedule and the update rule.
///
/// Progress through the run budget is split into epochs of
/// `restart_period`. Inside an epoch epsilon anneals along a half cosine
/// from the current ceiling down to `epsilon_min`; at each epoch boundary
/// the ceiling drops by `epsilon_restart_decay` (never below
/// `epsilon_min`) and epsilon restarts from it. The learning rate decays
/// linearly from `learning_rate_start` to `learning_rate_end` over the
/// whole budget.
///
/// # Examples
///
/// ```
/// use adaptive_brkga::qlearning::QLearningConfig;
///
/// let config = QLearningConfig::default()
///     .with_epsilon_range(0.1, 1.0)
///     .with_restart_period(0.2)
///     .with_discount(0.8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QLearningConfig {
    /// Initial epsilon ceiling.
    pub epsilon_max: f64,

    /// Floor of epsilon and of the ceiling.
    pub epsilon_min: f64,

    /// Amount the ceiling drops at each restart.
    pub epsilon_restart_decay: f64,

    /// Epoch length as a fraction of the budget, in (0, 1].
    pub restart_period: f64,

    pub learning_rate_start: f64,

    pub learning_rate_end: f64,

    /// Discount rate gamma, in [0, 1).
    pub discount: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            epsilon_max: 1.0,
            epsilon_min: 0.1,
            epsilon_restart_decay: 0.1,
            restart_period: 0.1,
            learning_rate_start: 1.0,
            learning_rate_end: 0.1,
            discount: 0.8,
        }
    }
}

impl QLearningConfig {
    pub fn with_epsilon_range(mut self, min: f64, max: f64) -> Self {
        self.epsilon_min = min;
        self.epsilon_max = max;
        self
    }

    pub fn with_epsilon_restart_decay(mut self, decay: f64) -> Self {
        self.epsilon_restart_decay = decay;
        self
    }

    pub fn with_restart_period(mut self, period: f64) -> Self {
        self.restart_period = period;
        self
    }

    pub fn with_learning_rate(mut self, start: f64, end: f64) -> Self {
        self.learning_rate_start = start;
        self.learning_rate_end = end;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(BrkgaError::InvalidConfig(msg));
        if !(0.0..=1.0).contains(&self.epsilon_min) || !(0.0..=1.0).contains(&self.epsilon_max) {
            return fail("epsilon bounds must lie in [0, 1]".into());
        }
        if self.epsilon_min > self.epsilon_max {
            return fail(format!(
                "epsilon_min ({}) must not exceed epsilon_max ({})",
                self.epsilon_min, self.epsilon_max
            ));
        }
        if self.epsilon_restart_decay < 0.0 {
            return fail("epsilon_restart_decay must be non-negative".into());
        }
        if self.restart_period <= 0.0 || self.restart_period > 1.0 {
            return fail(format!(
                "restart_period must be in (0, 1], got {}",
                self.restart_period
            ));
        }
        let lr_ok = |lr: f64| lr > 0.0 && lr <= 1.0;
        if !lr_ok(self.learning_rate_start) || !lr_ok(self.learning_rate_end) {
            return fail("learning rates must be in (0, 1]".into());
        }
        if !(0.0..1.0).contains(&self.discount) {
            return fail(format!("discount must be in [0, 1), got {}", self.discount));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QLearningConfig::default();
        assert!((config.epsilon_max - 1.0).abs() < 1e-10);
        assert!((config.epsilon_min - 0.1).abs() < 1e-10);
        assert!((config.discount - 0.8).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_epsilon_order() {
        let config = QLearningConfig::default().with_epsilon_range(0.9, 0.2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_discount() {
        assert!(QLearningConfig::default().with_discount(1.0).validate().is_err());
        assert!(QLearningConfig::default().with_discount(0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_learning_rate() {
        let config = QLearningConfig::default().with_learning_rate(0.0, 0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_restart_period() {
        assert!(QLearningConfig::default().with_restart_period(0.0).validate().is_err());
        assert!(QLearningConfig::default().with_restart_period(1.0).validate().is_ok());
    }
}
