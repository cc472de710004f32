//! Parameter states and the tabular Q-function over them.

use crate::brkga::{BrkgaParams, ParameterGrid};
use crate::error::Result;

/// A node of the parameter MDP.
///
/// `max_q` and `max_action` cache the greedy value and action and are
/// updated together with `q_values`.
#[derive(Debug, Clone)]
pub struct ParameterState {
    pub params: BrkgaParams,

    /// Destination state of each action.
    pub actions: Vec<usize>,

    /// Q-value of each action.
    pub q_values: Vec<f64>,

    pub max_q: f64,

    /// First action attaining `max_q`.
    pub max_action: usize,
}

/// Dense, fully connected state space: every state has one action per
/// state (itself included), and action `a` leads to state `a`.
#[derive(Debug, Clone)]
pub struct StateSpace {
    states: Vec<ParameterState>,
}

impl StateSpace {
    /// Builds a complete graph over the given tuples with all Q-values at 0.
    pub fn new(params: Vec<BrkgaParams>) -> Self {
        let n = params.len();
        let states = params
            .into_iter()
            .map(|params| ParameterState {
                params,
                actions: (0..n).collect(),
                q_values: vec![0.0; n],
                max_q: 0.0,
                max_action: 0,
            })
            .collect();
        Self { states }
    }

    /// One state per tuple of the grid's Cartesian product.
    pub fn from_grid(grid: &ParameterGrid) -> Result<Self> {
        grid.validate()?;
        Ok(Self::new(grid.combinations()))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, s: usize) -> &ParameterState {
        &self.states[s]
    }

    pub fn states(&self) -> &[ParameterState] {
        &self.states
    }

    /// State reached from `s` by action `a`.
    pub fn destination(&self, s: usize, a: usize) -> usize {
        self.states[s].actions[a]
    }

    pub fn q(&self, s: usize, a: usize) -> f64 {
        self.states[s].q_values[a]
    }

    /// One-step Q-learning update of `(s, a)`; returns the destination state.
    ///
    /// `Q(s,a) += lr * (reward + discount * maxQ(s') - Q(s,a))`
    pub fn update(
        &mut self,
        s: usize,
        a: usize,
        reward: f64,
        learning_rate: f64,
        discount: f64,
    ) -> usize {
        let next = self.destination(s, a);
        let target = reward + discount * self.states[next].max_q;

        let state = &mut self.states[s];
        let q = state.q_values[a] + learning_rate * (target - state.q_values[a]);
        state.q_values[a] = q;

        if a == state.max_action {
            if q >= state.max_q {
                state.max_q = q;
            } else {
                // the cached argmax lost value or became NaN
                let (best_a, best_q) = argmax(&state.q_values);
                state.max_q = best_q;
                state.max_action = best_a;
            }
        } else if outranks(q, a, state.max_q, state.max_action) {
            state.max_q = q;
            state.max_action = a;
        }
        next
    }

    /// Greedy destination state for every state.
    pub fn policy(&self) -> Vec<usize> {
        self.states
            .iter()
            .map(|state| state.actions[state.max_action])
            .collect()
    }
}

/// Whether action `a` with value `q` beats the incumbent. NaN ranks below
/// every number; equal values go to the lower index.
fn outranks(q: f64, a: usize, best_q: f64, best_a: usize) -> bool {
    if q.is_nan() {
        return false;
    }
    best_q.is_nan() || q > best_q || (q == best_q && a < best_a)
}

/// Index and value of the maximum under [`outranks`]. NaN is returned only
/// when every value is NaN.
fn argmax(values: &[f64]) -> (usize, f64) {
    let mut best = (0, values[0]);
    for (i, &v) in values.iter().enumerate().skip(1) {
        if outranks(v, i, best.1, best.0) {
            best = (i, v);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qlearning::QLearningController;

    fn toy(n: usize) -> StateSpace {
        StateSpace::new(
            (0..n)
                .map(|i| BrkgaParams::new(10 * (i + 1), 0.2, 0.1, 0.7))
                .collect(),
        )
    }

    #[test]
    fn test_from_grid_is_complete() {
        let grid = ParameterGrid::new(vec![10, 20], vec![0.2, 0.3], vec![0.1], vec![0.7]);
        let space = StateSpace::from_grid(&grid).unwrap();
        assert_eq!(space.len(), 4);
        for state in space.states() {
            assert_eq!(state.actions, vec![0, 1, 2, 3]);
            assert_eq!(state.q_values, vec![0.0; 4]);
        }
        assert_eq!(space.destination(2, 3), 3);
    }

    #[test]
    fn test_from_grid_rejects_invalid() {
        let grid = ParameterGrid::new(vec![], vec![0.2], vec![0.1], vec![0.7]);
        assert!(StateSpace::from_grid(&grid).is_err());
    }

    #[test]
    fn test_update_rule() {
        let mut space = toy(2);
        let next = space.update(0, 1, 1.0, 0.5, 0.9);
        assert_eq!(next, 1);
        assert!((space.q(0, 1) - 0.5).abs() < 1e-12);
        assert_eq!(space.state(0).max_action, 1);
        assert!((space.state(0).max_q - 0.5).abs() < 1e-12);

        // action 0 leads back to state 0, whose maxQ is 0.5
        space.update(0, 0, 2.0, 1.0, 0.5);
        assert!((space.q(0, 0) - 2.25).abs() < 1e-12);
        assert_eq!(space.state(0).max_action, 0);
    }

    #[test]
    fn test_cache_recomputed_when_argmax_drops() {
        let mut space = toy(3);
        space.update(0, 2, 1.0, 1.0, 0.0);
        space.update(0, 1, 0.5, 1.0, 0.0);
        assert_eq!(space.state(0).max_action, 2);

        space.update(0, 2, -1.0, 1.0, 0.0);
        assert_eq!(space.state(0).max_action, 1);
        assert!((space.state(0).max_q - 0.5).abs() < 1e-12);
    }

    fn assert_cache_exact(space: &StateSpace, s: usize) {
        let state = space.state(s);
        let (best_a, best_q) = argmax(&state.q_values);
        assert_eq!(state.max_action, best_a, "q = {:?}", state.q_values);
        assert!(
            state.max_q == best_q || (state.max_q.is_nan() && best_q.is_nan()),
            "cached {} != {best_q}",
            state.max_q
        );
    }

    #[test]
    fn test_cache_survives_zero_best_rewards() {
        let equal = QLearningController::reward(false, 0.0, 0.0, 10);
        let worse = QLearningController::reward(false, 0.0, 0.5, 10);
        assert!(equal.is_nan());
        assert_eq!(worse, f64::NEG_INFINITY);

        let mut space = toy(3);
        space.update(0, 1, 1.0, 1.0, 0.8);
        assert_eq!(space.state(0).max_action, 1);

        space.update(0, 1, equal, 0.5, 0.8);
        assert!(space.q(0, 1).is_nan());
        assert_cache_exact(&space, 0);
        assert_eq!(space.state(0).max_action, 0);
        assert_eq!(space.state(0).max_q, 0.0);

        space.update(0, 0, worse, 0.5, 0.8);
        assert_cache_exact(&space, 0);
        assert_eq!(space.state(0).max_action, 2);

        space.update(0, 2, worse, 0.5, 0.8);
        assert_cache_exact(&space, 0);
        assert_eq!(space.state(0).max_q, f64::NEG_INFINITY);

        // the greedy action turns NaN; the remaining finite value leads
        space.update(0, 0, equal, 0.5, 0.8);
        assert!(space.q(0, 0).is_nan());
        assert_cache_exact(&space, 0);
        assert_eq!(space.state(0).max_action, 2);
    }

    #[test]
    fn test_argmax_ranks_nan_lowest() {
        assert_eq!(argmax(&[f64::NAN, -1.0, f64::NAN]), (1, -1.0));
        let (a, q) = argmax(&[f64::NAN, f64::NAN]);
        assert_eq!(a, 0);
        assert!(q.is_nan());
    }

    #[test]
    fn test_ties_break_by_first_action() {
        let mut space = toy(3);
        space.update(0, 2, 1.0, 1.0, 0.0);
        space.update(0, 1, 1.0, 1.0, 0.0);
        assert_eq!(space.state(0).max_action, 1);
    }

    #[test]
    fn test_two_state_convergence() {
        let mut space = toy(2);
        let (reward, lr, gamma) = (1.0, 0.5, 0.9);
        for _ in 0..2000 {
            for s in 0..2 {
                for a in 0..2 {
                    space.update(s, a, reward, lr, gamma);
                }
            }
        }
        let expected = reward / (1.0 - gamma);
        for s in 0..2 {
            for a in 0..2 {
                assert!(
                    (space.q(s, a) - expected).abs() < 1e-6,
                    "Q({s},{a}) = {} != {expected}",
                    space.q(s, a)
                );
            }
        }
    }

    #[test]
    fn test_policy() {
        let mut space = toy(3);
        space.update(0, 2, 1.0, 1.0, 0.0);
        space.update(1, 0, 1.0, 1.0, 0.0);
        assert_eq!(space.policy(), vec![2, 0, 0]);
    }
}
