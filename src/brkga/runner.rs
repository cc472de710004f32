//! BRKGA run orchestration.

use super::archive::{EliteArchive, NoArchive};
use super::clock::{Clock, SystemClock};
use super::config::{BrkgaConfig, ControlMode};
use super::generation::{evolve, GenerationOutcome};
use super::params::BrkgaParams;
use super::population::{Population, ResizeOutcome};
use super::types::{BrkgaDecoder, LocalSearch, NoLocalSearch};
use crate::cancel::is_cancelled;
use crate::error::{BrkgaError, Result};
use crate::qlearning::{QLearningController, StateSpace};
use crate::random::rng_from_seed;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Result of a BRKGA optimization run.
#[derive(Debug, Clone)]
pub struct BrkgaResult {
    /// The best random-key chromosome found.
    pub best_keys: Vec<f64>,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Generation in which the best solution was found (0 = initial population).
    pub best_generation: usize,

    /// Number of completed generations.
    pub generations: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best cost of the initial population, then after each completed generation.
    pub cost_history: Vec<f64>,

    /// Parameters used by the last generation.
    pub final_params: BrkgaParams,

    /// Exploration restarts performed (0 in offline mode).
    pub restarts: usize,

    /// Greedy destination per state (Q-learning mode only).
    pub policy: Option<Vec<usize>>,
}

/// Executes the BRKGA algorithm.
pub struct BrkgaRunner;

impl BrkgaRunner {
    /// Runs BRKGA optimization.
    pub fn run<D: BrkgaDecoder>(decoder: &D, config: &BrkgaConfig) -> Result<BrkgaResult> {
        Self::run_with_cancel(decoder, config, None)
    }

    /// Runs BRKGA with an optional cancellation token.
    pub fn run_with_cancel<D: BrkgaDecoder>(
        decoder: &D,
        config: &BrkgaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BrkgaResult> {
        Self::run_with(
            decoder,
            &NoLocalSearch,
            &mut NoArchive,
            &SystemClock::new(),
            config,
            cancel,
        )
    }

    /// Runs BRKGA with every collaborator supplied by the caller.
    ///
    /// Each generation: poll the flag, let the controller pick the next
    /// parameters and resize the population (Q-learning mode), evolve,
    /// record a strictly better leader in `archive`, then feed the reward
    /// back to the controller. The flag is also polled before every
    /// offspring, mutant and resize decode; once it is seen the run
    /// returns the last committed best with `cancelled = true`.
    ///
    /// # Errors
    /// Returns [`BrkgaError`] if the configuration is invalid. No search
    /// work is done in that case.
    pub fn run_with<D, L, A, C>(
        decoder: &D,
        local_search: &L,
        archive: &mut A,
        clock: &C,
        config: &BrkgaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BrkgaResult>
    where
        D: BrkgaDecoder,
        L: LocalSearch,
        A: EliteArchive,
        C: Clock,
    {
        config.validate()?;

        let mut rng = rng_from_seed(config.seed);
        let n = config.chromosome_length;
        let cancel = cancel.as_deref();
        let start = clock.now();

        let mut controller = match config.control {
            ControlMode::Offline => None,
            ControlMode::QLearning => {
                let space = StateSpace::from_grid(&config.grid)?;
                Some(QLearningController::new(space, &config.qlearning, &mut rng)?)
            }
        };
        let mut params = match &controller {
            Some(ctrl) => ctrl.current_params(),
            None => config
                .grid
                .first()
                .ok_or_else(|| BrkgaError::InvalidConfig("parameter grid is empty".into()))?,
        };

        info!(
            label = %config.label,
            control = ?config.control,
            states = config.grid.len(),
            population = params.population_size,
            keys = n,
            "starting run"
        );

        let mut population =
            Population::random(n, params.population_size, decoder, &mut rng, config.parallel);
        let mut best = population
            .best()
            .cloned()
            .ok_or_else(|| BrkgaError::InvalidConfig("empty initial population".into()))?;
        let mut best_generation = 0usize;
        let mut cost_history = vec![best.fitness];
        let mut generations = 0usize;
        let mut cancelled = false;

        loop {
            let elapsed = clock.now() - start;
            if config.budget_exhausted(elapsed, generations) {
                break;
            }
            if is_cancelled(cancel) {
                cancelled = true;
                break;
            }

            if let Some(ctrl) = controller.as_mut() {
                ctrl.update_schedule(config.progress(elapsed, generations));
                params = ctrl.choose_action(&mut rng);
                match population.resize(&params, n, decoder, &mut rng, cancel) {
                    ResizeOutcome::Cancelled => {
                        cancelled = true;
                        break;
                    }
                    ResizeOutcome::Unchanged => {}
                    outcome => trace!(?outcome, "population resized"),
                }
            }

            let best_offspring =
                match evolve(&mut population, &params, n, decoder, local_search, &mut rng, cancel)? {
                    GenerationOutcome::Completed { best_offspring } => best_offspring,
                    GenerationOutcome::Cancelled => {
                        cancelled = true;
                        break;
                    }
                };
            generations += 1;

            let mut improved = false;
            if let Some(leader) = population.best() {
                if leader.fitness < best.fitness {
                    best = leader.clone();
                    best_generation = generations;
                    improved = true;
                    archive.record(&best, &config.label);
                }
            }

            match controller.as_mut() {
                Some(ctrl) => {
                    let reward = QLearningController::reward(
                        improved,
                        best.fitness,
                        best_offspring,
                        params.population_size,
                    );
                    let state = ctrl.learn(reward);
                    debug!(
                        generation = generations,
                        p = params.population_size,
                        pe = params.elite_fraction,
                        pm = params.mutant_fraction,
                        rhoe = params.crossover_bias,
                        best = best.fitness,
                        offspring = best_offspring,
                        reward,
                        epsilon = ctrl.epsilon(),
                        state,
                        "generation"
                    );
                }
                None => debug!(
                    generation = generations,
                    best = best.fitness,
                    offspring = best_offspring,
                    "generation"
                ),
            }

            cost_history.push(best.fitness);
        }

        let policy = controller.as_ref().map(|ctrl| ctrl.policy());
        if let Some(policy) = &policy {
            debug!(?policy, "learned policy");
        }
        info!(
            best = best.fitness,
            best_generation,
            generations,
            cancelled,
            "run finished"
        );

        Ok(BrkgaResult {
            best_keys: best.keys,
            best_cost: best.fitness,
            best_generation,
            generations,
            cancelled,
            cost_history,
            final_params: params,
            restarts: controller.as_ref().map_or(0, |ctrl| ctrl.restarts()),
            policy,
        })
    }
}
