//! End-to-end runs through the public API.

use adaptive_brkga::brkga::{
    BrkgaConfig, BrkgaDecoder, BrkgaParams, BrkgaRunner, ControlMode, KeyPerturbation,
    NoArchive, ParameterGrid, Population, SolutionPool, SystemClock,
};
use adaptive_brkga::qlearning::QLearningConfig;
use adaptive_brkga::random::create_rng;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

struct SumDecoder;

impl BrkgaDecoder for SumDecoder {
    fn decode(&self, keys: &[f64]) -> f64 {
        keys.iter().sum()
    }
}

/// Raises the shared flag once `limit` decodes have happened.
struct TrippingDecoder {
    flag: Arc<AtomicBool>,
    calls: AtomicUsize,
    limit: usize,
}

impl BrkgaDecoder for TrippingDecoder {
    fn decode(&self, keys: &[f64]) -> f64 {
        if self.calls.fetch_add(1, Ordering::Relaxed) + 1 >= self.limit {
            self.flag.store(true, Ordering::Relaxed);
        }
        keys.iter().sum()
    }
}

#[test]
fn offline_sum_of_keys_never_worse_than_initial_best() {
    let n = 10;
    let seed = 2024;
    let config = BrkgaConfig::new(n)
        .with_params(BrkgaParams::new(10, 0.2, 0.1, 0.7))
        .with_max_generations(50)
        .with_seed(seed);

    let result = BrkgaRunner::run(&SumDecoder, &config).unwrap();

    // the first draws of the run's RNG build the initial population
    let mut rng = create_rng(seed);
    let initial = Population::random(n, 10, &SumDecoder, &mut rng, false);
    let initial_best = initial.best().map(|c| c.fitness).unwrap();

    assert_eq!(result.generations, 50);
    assert_eq!(result.cost_history[0], initial_best);
    assert!(result.best_cost <= initial_best);
    assert!((result.best_cost - SumDecoder.decode(&result.best_keys)).abs() < 1e-12);
}

#[test]
fn best_individual_is_monotone_in_both_modes() {
    for control in [ControlMode::Offline, ControlMode::QLearning] {
        let config = BrkgaConfig::new(12)
            .with_grid(ParameterGrid::new(
                vec![20, 30, 50],
                vec![0.2, 0.3],
                vec![0.1, 0.2],
                vec![0.65, 0.8],
            ))
            .with_control(control)
            .with_max_generations(60)
            .with_seed(5);

        let result = BrkgaRunner::run(&SumDecoder, &config).unwrap();

        for window in result.cost_history.windows(2) {
            assert!(window[1] <= window[0], "{control:?}: {} > {}", window[1], window[0]);
        }
        assert_eq!(result.cost_history.last().copied(), Some(result.best_cost));
    }
}

#[test]
fn cancellation_mid_generation_keeps_last_committed_best() {
    let flag = Arc::new(AtomicBool::new(false));
    // 20 initial decodes, then a few generations of 20 decodes each
    let decoder = TrippingDecoder {
        flag: flag.clone(),
        calls: AtomicUsize::new(0),
        limit: 20 + 3 * 20 + 7,
    };
    let config = BrkgaConfig::new(6)
        .with_params(BrkgaParams::new(20, 0.2, 0.1, 0.7))
        .with_max_generations(1000)
        .with_seed(17);

    let result = BrkgaRunner::run_with_cancel(&decoder, &config, Some(flag)).unwrap();

    assert!(result.cancelled);
    assert_eq!(result.generations, 3);
    assert_eq!(result.cost_history.len(), 4);
    assert_eq!(result.cost_history.last().copied(), Some(result.best_cost));
    // the run stopped at the first poll after the flag went up
    assert_eq!(decoder.calls.load(Ordering::Relaxed), 20 + 3 * 20 + 7);
}

#[test]
fn cancellation_with_adaptive_resizing() {
    let flag = Arc::new(AtomicBool::new(false));
    // the flag trips on the 11th decode, inside the initial population or
    // the first resize/generation depending on the drawn start state
    let decoder = TrippingDecoder {
        flag: flag.clone(),
        calls: AtomicUsize::new(0),
        limit: 11,
    };
    let config = BrkgaConfig::new(4)
        .with_grid(ParameterGrid::new(vec![10, 200], vec![0.2], vec![0.1], vec![0.7]))
        .with_control(ControlMode::QLearning)
        .with_qlearning(QLearningConfig::default().with_epsilon_range(1.0, 1.0))
        .with_max_generations(100)
        .with_seed(1);

    let result = BrkgaRunner::run_with_cancel(&decoder, &config, Some(flag)).unwrap();

    assert!(result.cancelled);
    assert!(result.generations < 100);
    assert_eq!(result.cost_history.len(), result.generations + 1);
}

#[test]
fn adaptive_run_with_collaborators() {
    let config = BrkgaConfig::new(16)
        .with_grid(ParameterGrid::new(
            vec![30, 60, 120],
            vec![0.1, 0.2],
            vec![0.05, 0.15],
            vec![0.6, 0.7, 0.8],
        ))
        .with_control(ControlMode::QLearning)
        .with_max_generations(100)
        .with_seed(8);
    let mut pool = SolutionPool::new(10);

    let result = BrkgaRunner::run_with(
        &SumDecoder,
        &KeyPerturbation::new(0.05, 10),
        &mut pool,
        &SystemClock::new(),
        &config,
        None,
    )
    .unwrap();

    assert!(result.best_cost <= result.cost_history[0]);
    assert_eq!(result.policy.map(|p| p.len()), Some(36));
    let pooled: Vec<f64> = pool.iter().map(|(c, _)| c.fitness).collect();
    assert!(pooled.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn invalid_grid_fails_before_search() {
    let decoder = TrippingDecoder {
        flag: Arc::new(AtomicBool::new(false)),
        calls: AtomicUsize::new(0),
        limit: usize::MAX,
    };
    let config = BrkgaConfig::new(4)
        .with_grid(ParameterGrid::new(vec![10], vec![], vec![0.1], vec![0.7]))
        .with_control(ControlMode::QLearning);

    let result = BrkgaRunner::run_with(
        &decoder,
        &KeyPerturbation::default(),
        &mut NoArchive,
        &SystemClock::new(),
        &config,
        None,
    );

    assert!(result.is_err());
    assert_eq!(decoder.calls.load(Ordering::Relaxed), 0);
}
