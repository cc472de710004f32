//! Random-key chromosome.

use super::types::BrkgaDecoder;
use rand::Rng;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A random-key vector and its cost. Lower cost is better.
///
/// The default value is an empty, unevaluated placeholder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chromosome {
    /// Keys in `[0, 1)`.
    pub keys: Vec<f64>,

    /// Decoded cost, `f64::INFINITY` until evaluated.
    pub fitness: f64,
}

impl Default for Chromosome {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            fitness: f64::INFINITY,
        }
    }
}

impl Chromosome {
    /// Wraps keys into an unevaluated chromosome.
    pub fn new(keys: Vec<f64>) -> Self {
        Self {
            keys,
            fitness: f64::INFINITY,
        }
    }

    /// `n` independent uniform keys in `[0, 1)`, unevaluated.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        Self::new((0..n).map(|_| rng.random_range(0.0..1.0)).collect())
    }

    /// Decodes the keys and stores the cost.
    pub fn evaluate<D: BrkgaDecoder + ?Sized>(&mut self, decoder: &D) {
        self.fitness = decoder.decode(&self.keys);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Ascending-cost ordering; incomparable costs count as equal.
pub(crate) fn by_fitness(a: &Chromosome, b: &Chromosome) -> Ordering {
    a.fitness.partial_cmp(&b.fitness).unwrap_or(Ordering::Equal)
}

/// Sorts chromosomes best-first.
pub fn sort_by_fitness(chromosomes: &mut [Chromosome]) {
    chromosomes.sort_by(by_fitness);
}
