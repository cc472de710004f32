//! BRKGA configuration.

use super::params::{BrkgaParams, ParameterGrid};
use crate::error::{BrkgaError, Result};
use crate::qlearning::QLearningConfig;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the evolutionary parameters are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlMode {
    /// First value of every grid list, fixed for the whole run.
    #[default]
    Offline,
    /// A Q-learning controller picks a grid tuple every generation and the
    /// population is resized to match.
    QLearning,
}

/// Configuration for a BRKGA run.
///
/// The run stops when the wall-clock `time_limit` or the
/// `max_generations` cap is reached, whichever comes first. At least one
/// of them must be set.
///
/// # Examples
///
/// ```
/// use adaptive_brkga::brkga::{BrkgaConfig, BrkgaParams, ControlMode, ParameterGrid};
/// use std::time::Duration;
///
/// let offline = BrkgaConfig::new(50) // 50 random keys
///     .with_params(BrkgaParams::new(200, 0.20, 0.15, 0.70))
///     .with_max_generations(300);
/// assert!(offline.validate().is_ok());
///
/// let adaptive = BrkgaConfig::new(50)
///     .with_grid(ParameterGrid::new(
///         vec![100, 200, 400],
///         vec![0.10, 0.15, 0.20, 0.25],
///         vec![0.05, 0.10, 0.15, 0.20],
///         vec![0.60, 0.70, 0.80],
///     ))
///     .with_control(ControlMode::QLearning)
///     .with_time_limit(Duration::from_secs(10))
///     .with_max_generations(0);
/// assert!(adaptive.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrkgaConfig {
    /// Number of random keys per chromosome.
    pub chromosome_length: usize,

    /// Candidate parameter values.
    pub grid: ParameterGrid,

    pub control: ControlMode,

    /// Controller settings, used in [`ControlMode::QLearning`] only.
    pub qlearning: QLearningConfig,

    /// Wall-clock budget (`None` to disable).
    pub time_limit: Option<Duration>,

    /// Generation budget (0 to disable).
    pub max_generations: usize,

    /// Whether to decode the initial population in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Method label passed to the elite archive.
    pub label: String,
}

impl BrkgaConfig {
    /// Creates a new configuration with the given chromosome length.
    pub fn new(chromosome_length: usize) -> Self {
        Self {
            chromosome_length,
            grid: ParameterGrid::fixed(BrkgaParams::new(100, 0.20, 0.15, 0.70)),
            control: ControlMode::Offline,
            qlearning: QLearningConfig::default(),
            time_limit: None,
            max_generations: 500,
            parallel: false,
            seed: None,
            label: "BRKGA".to_string(),
        }
    }

    /// Runs with a single fixed parameter tuple.
    pub fn with_params(mut self, params: BrkgaParams) -> Self {
        self.grid = ParameterGrid::fixed(params);
        self
    }

    pub fn with_grid(mut self, grid: ParameterGrid) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_control(mut self, control: ControlMode) -> Self {
        self.control = control;
        self
    }

    pub fn with_qlearning(mut self, qlearning: QLearningConfig) -> Self {
        self.qlearning = qlearning;
        self
    }

    /// Sets a wall-clock budget.
    ///
    /// The generation cap (500 by default) stays active; call
    /// `with_max_generations(0)` for a purely time-bounded run.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.chromosome_length == 0 {
            return Err(BrkgaError::InvalidConfig(
                "chromosome_length must be at least 1".into(),
            ));
        }
        let timed = self.time_limit.is_some_and(|t| !t.is_zero());
        if !timed && self.max_generations == 0 {
            return Err(BrkgaError::InvalidConfig(
                "either time_limit or max_generations must be set".into(),
            ));
        }
        self.grid.validate()?;
        if self.control == ControlMode::QLearning {
            self.qlearning.validate()?;
        }
        Ok(())
    }

    /// Fraction of the budget consumed, in [0, 1].
    ///
    /// With both budgets set, the further advanced one counts.
    pub fn progress(&self, elapsed_secs: f64, generations: usize) -> f64 {
        let by_time = self
            .time_limit
            .filter(|t| !t.is_zero())
            .map(|t| elapsed_secs / t.as_secs_f64());
        let by_generation =
            (self.max_generations > 0).then(|| generations as f64 / self.max_generations as f64);

        let progress = match (by_time, by_generation) {
            (Some(a), Some(b)) => a.max(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => 0.0,
        };
        progress.clamp(0.0, 1.0)
    }

    /// Whether either budget is used up.
    pub fn budget_exhausted(&self, elapsed_secs: f64, generations: usize) -> bool {
        let out_of_time = self
            .time_limit
            .filter(|t| !t.is_zero())
            .is_some_and(|t| elapsed_secs >= t.as_secs_f64());
        let out_of_generations = self.max_generations > 0 && generations >= self.max_generations;
        out_of_time || out_of_generations
    }
}
