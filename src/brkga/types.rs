//! Problem-side traits: the decoder and the local-search operator.

use super::chromosome::Chromosome;
use rand::Rng;

/// Decoder trait for BRKGA.
///
/// Maps a random-key chromosome (a slice of `f64` in `[0, 1)`) to a cost.
/// Lower cost is better (minimization). Decoding must be deterministic
/// for a given key vector and must not depend on call order.
///
/// # Examples
///
/// ```ignore
/// struct KnapsackDecoder { weights: Vec<f64>, values: Vec<f64>, capacity: f64 }
///
/// impl BrkgaDecoder for KnapsackDecoder {
///     fn decode(&self, keys: &[f64]) -> f64 {
///         // keys[i] > 0.5 means include item i
///         let (total_w, total_v) = keys.iter().enumerate()
///             .filter(|(_, &k)| k > 0.5)
///             .fold((0.0, 0.0), |(w, v), (i, _)| (w + self.weights[i], v + self.values[i]));
///         if total_w > self.capacity { f64::INFINITY } else { -total_v }
///     }
/// }
/// ```
///
/// # References
///
/// Bean (1994), Goncalves & Resende (2011)
pub trait BrkgaDecoder: Send + Sync {
    /// Decodes a random-key chromosome and returns its cost.
    fn decode(&self, keys: &[f64]) -> f64;
}

/// In-place refinement of a single chromosome.
///
/// Applied once per generation to one randomly chosen elite chromosome.
/// On return, `chromosome.fitness` must equal the decoded cost of
/// `chromosome.keys`.
pub trait LocalSearch {
    fn refine<D, R>(&self, decoder: &D, chromosome: &mut Chromosome, rng: &mut R)
    where
        D: BrkgaDecoder + ?Sized,
        R: Rng;
}

/// Leaves the chromosome untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalSearch;

impl LocalSearch for NoLocalSearch {
    fn refine<D, R>(&self, _decoder: &D, _chromosome: &mut Chromosome, _rng: &mut R)
    where
        D: BrkgaDecoder + ?Sized,
        R: Rng,
    {
    }
}

/// First-improvement hill climber over single-key perturbations.
///
/// Each trial picks one key, shifts it by a uniform amount in
/// `[-step, step]`, wraps it back into `[0, 1)` and keeps the move if the
/// cost strictly decreases. Stops after `max_trials` trials.
#[derive(Debug, Clone, Copy)]
pub struct KeyPerturbation {
    /// Maximum absolute shift of a key.
    pub step: f64,

    /// Number of perturbation trials per call.
    pub max_trials: usize,
}

impl Default for KeyPerturbation {
    fn default() -> Self {
        Self {
            step: 0.1,
            max_trials: 20,
        }
    }
}

impl KeyPerturbation {
    pub fn new(step: f64, max_trials: usize) -> Self {
        Self { step, max_trials }
    }
}

impl LocalSearch for KeyPerturbation {
    fn refine<D, R>(&self, decoder: &D, chromosome: &mut Chromosome, rng: &mut R)
    where
        D: BrkgaDecoder + ?Sized,
        R: Rng,
    {
        if chromosome.is_empty() || self.step <= 0.0 {
            return;
        }
        // Callers may hand in a stale cost; re-decode once up front.
        chromosome.evaluate(decoder);

        let n = chromosome.len();
        for _ in 0..self.max_trials {
            let j = rng.random_range(0..n);
            let old = chromosome.keys[j];
            let shifted = (old + rng.random_range(-self.step..=self.step)).rem_euclid(1.0);
            // rem_euclid can round up to exactly 1.0 for tiny negative inputs
            chromosome.keys[j] = if shifted >= 1.0 { 0.0 } else { shifted };

            let cost = decoder.decode(&chromosome.keys);
            if cost < chromosome.fitness {
                chromosome.fitness = cost;
            } else {
                chromosome.keys[j] = old;
            }
        }
    }
}
