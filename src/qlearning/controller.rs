//! Epsilon-greedy Q-learning over parameter states.

use super::config::QLearningConfig;
use super::schedule::ExplorationSchedule;
use super::state::StateSpace;
use crate::brkga::BrkgaParams;
use crate::error::{BrkgaError, Result};
use rand::Rng;

/// Online controller that picks the next parameter state every generation.
///
/// Per generation the caller does:
///
/// 1. [`update_schedule`](Self::update_schedule) with the budget progress,
/// 2. [`choose_action`](Self::choose_action) to get the parameters to run,
/// 3. after the generation, [`learn`](Self::learn) with the
///    [`reward`](Self::reward), which also moves to the chosen state.
#[derive(Debug, Clone)]
pub struct QLearningController {
    space: StateSpace,
    schedule: ExplorationSchedule,
    discount: f64,
    current_state: usize,
    current_action: usize,
    epsilon: f64,
    learning_rate: f64,
}

impl QLearningController {
    /// Creates a controller starting in a uniformly random state.
    pub fn new<R: Rng>(space: StateSpace, config: &QLearningConfig, rng: &mut R) -> Result<Self> {
        if space.is_empty() {
            return Err(BrkgaError::InvalidConfig("state space is empty".into()));
        }
        let initial = rng.random_range(0..space.len());
        Self::with_initial_state(space, config, initial)
    }

    /// Creates a controller starting in `initial`.
    pub fn with_initial_state(
        space: StateSpace,
        config: &QLearningConfig,
        initial: usize,
    ) -> Result<Self> {
        config.validate()?;
        if initial >= space.len() {
            return Err(BrkgaError::InvalidConfig(format!(
                "initial state {initial} out of range for {} states",
                space.len()
            )));
        }
        Ok(Self {
            space,
            schedule: ExplorationSchedule::new(config),
            discount: config.discount,
            current_state: initial,
            current_action: initial,
            epsilon: config.epsilon_max,
            learning_rate: config.learning_rate_start,
        })
    }

    pub fn space(&self) -> &StateSpace {
        &self.space
    }

    pub fn current_state(&self) -> usize {
        self.current_state
    }

    pub fn current_action(&self) -> usize {
        self.current_action
    }

    /// Parameters of the current state.
    pub fn current_params(&self) -> BrkgaParams {
        self.space.state(self.current_state).params
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn restarts(&self) -> usize {
        self.schedule.restarts()
    }

    /// Recomputes epsilon and the learning rate for `progress` in [0, 1].
    pub fn update_schedule(&mut self, progress: f64) {
        self.epsilon = self.schedule.epsilon(progress);
        self.learning_rate = self.schedule.learning_rate(progress);
    }

    /// Epsilon-greedy choice from the current state.
    ///
    /// Returns the parameters of the destination state; the move itself
    /// happens in [`learn`](Self::learn).
    pub fn choose_action<R: Rng>(&mut self, rng: &mut R) -> BrkgaParams {
        let state = self.space.state(self.current_state);
        self.current_action = if rng.random_range(0.0..1.0) < self.epsilon {
            rng.random_range(0..state.actions.len())
        } else {
            state.max_action
        };
        let next = self.space.destination(self.current_state, self.current_action);
        self.space.state(next).params
    }

    /// Reward for one generation.
    ///
    /// A new global best earns `1 + 1/p`. Otherwise the reward is the
    /// relative gap between the best individual and the generation's best
    /// offspring, negative when the offspring is worse. The ratio is
    /// unbounded when `best_fitness` is near zero.
    pub fn reward(
        improved: bool,
        best_fitness: f64,
        best_offspring: f64,
        population_size: usize,
    ) -> f64 {
        if improved {
            1.0 + 1.0 / population_size as f64
        } else {
            (best_fitness - best_offspring) / best_fitness
        }
    }

    /// Updates `Q(s, a)` for the last chosen action and moves to its
    /// destination. Returns the new current state.
    pub fn learn(&mut self, reward: f64) -> usize {
        self.current_state = self.space.update(
            self.current_state,
            self.current_action,
            reward,
            self.learning_rate,
            self.discount,
        );
        self.current_state
    }

    /// Greedy destination per state.
    pub fn policy(&self) -> Vec<usize> {
        self.space.policy()
    }
}
