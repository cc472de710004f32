//! Double-buffered population and the resizing algorithm.

use super::chromosome::{by_fitness, sort_by_fitness, Chromosome};
use super::crossover::parametric_uniform_crossover;
use super::params::BrkgaParams;
use super::types::BrkgaDecoder;
use crate::cancel::is_cancelled;
use rand::Rng;
use std::cmp::Ordering;
use std::sync::atomic::AtomicBool;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What [`Population::resize`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Target equals the current size.
    Unchanged,
    /// Population pruned from `from` to `to` chromosomes.
    Shrunk { from: usize, to: usize },
    /// Population extended with crossover offspring.
    Grown { from: usize, to: usize },
    /// Growth aborted by the cancellation flag.
    Cancelled,
}

/// The current population plus the scratch buffer the next generation is
/// assembled in.
///
/// `current` is sorted ascending by fitness at every generation boundary.
#[derive(Debug, Clone, Default)]
pub struct Population {
    current: Vec<Chromosome>,
    intermediate: Vec<Chromosome>,
}

impl Population {
    /// Wraps already-evaluated chromosomes, sorting them best-first.
    pub fn from_chromosomes(mut chromosomes: Vec<Chromosome>) -> Self {
        sort_by_fitness(&mut chromosomes);
        let size = chromosomes.len();
        let mut population = Self {
            current: chromosomes,
            intermediate: Vec::new(),
        };
        population.reset_intermediate(size);
        population
    }

    /// Creates `size` random chromosomes of length `n`, decodes and sorts them.
    pub fn random<D, R>(n: usize, size: usize, decoder: &D, rng: &mut R, parallel: bool) -> Self
    where
        D: BrkgaDecoder,
        R: Rng,
    {
        let mut chromosomes: Vec<Chromosome> =
            (0..size).map(|_| Chromosome::random(n, rng)).collect();
        decode_all(decoder, &mut chromosomes, parallel);
        Self::from_chromosomes(chromosomes)
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// The current chromosomes, best first.
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.current
    }

    pub fn best(&self) -> Option<&Chromosome> {
        self.current.first()
    }

    /// Whether fitness is non-decreasing by index.
    pub fn is_sorted(&self) -> bool {
        self.current
            .windows(2)
            .all(|w| by_fitness(&w[0], &w[1]) != Ordering::Greater)
    }

    /// Length of the scratch buffer.
    pub fn intermediate_len(&self) -> usize {
        self.intermediate.len()
    }

    pub(crate) fn buffers_mut(&mut self) -> (&[Chromosome], &mut [Chromosome]) {
        (&self.current, &mut self.intermediate)
    }

    pub(crate) fn current_mut(&mut self) -> &mut [Chromosome] {
        &mut self.current
    }

    /// Makes the intermediate buffer the current population.
    pub(crate) fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.current, &mut self.intermediate);
    }

    pub(crate) fn sort(&mut self) {
        sort_by_fitness(&mut self.current);
    }

    fn reset_intermediate(&mut self, size: usize) {
        self.intermediate.clear();
        self.intermediate.resize_with(size, Chromosome::default);
    }

    /// Grows or shrinks the population to `params.population_size`.
    ///
    /// Shrinking keeps the best `floor(p * pe)` chromosomes and fills the
    /// rest with copies taken from offset `floor(pe * old)` onward, i.e.
    /// from around the old elite boundary rather than from the tail.
    /// Growing appends decoded PUX offspring whose parents come from the
    /// old population's elite split, then re-sorts. The flag is polled
    /// before every new offspring.
    ///
    /// Non-elite growth parents span all of `[floor(old * pe), old)`, the
    /// last old chromosome included. This departs from the usual form of
    /// the resize, which stops the non-elite range at `old - 1`.
    ///
    /// The population must be sorted, and `floor(old * pe)` must leave
    /// both pools non-empty (guaranteed when `old` and `pe` come from a
    /// validated [`super::ParameterGrid`]).
    pub fn resize<D, R>(
        &mut self,
        params: &BrkgaParams,
        n: usize,
        decoder: &D,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> ResizeOutcome
    where
        D: BrkgaDecoder + ?Sized,
        R: Rng,
    {
        let target = params.population_size;
        let old = self.current.len();

        let outcome = match old.cmp(&target) {
            Ordering::Equal => return ResizeOutcome::Unchanged,
            Ordering::Greater => {
                let keep = params.elite_count();
                let offset = (params.elite_fraction * old as f64) as usize;
                let previous = std::mem::take(&mut self.current);

                self.current.reserve(target);
                self.current.extend_from_slice(&previous[..keep]);
                self.current
                    .extend_from_slice(&previous[offset..offset + (target - keep)]);
                ResizeOutcome::Shrunk {
                    from: old,
                    to: target,
                }
            }
            Ordering::Less => {
                let elite = (old as f64 * params.elite_fraction) as usize;
                debug_assert!(elite > 0 && elite < old, "empty parent pool");

                self.current.reserve(target - old);
                for _ in old..target {
                    if is_cancelled(cancel) {
                        return ResizeOutcome::Cancelled;
                    }
                    let mut child = parametric_uniform_crossover(
                        &self.current[..old],
                        elite,
                        params.crossover_bias,
                        n,
                        rng,
                    );
                    child.evaluate(decoder);
                    self.current.push(child);
                }
                self.sort();
                ResizeOutcome::Grown {
                    from: old,
                    to: target,
                }
            }
        };

        self.reset_intermediate(target);
        outcome
    }
}

#[cfg(feature = "parallel")]
fn decode_all<D: BrkgaDecoder>(decoder: &D, chromosomes: &mut [Chromosome], parallel: bool) {
    if parallel {
        chromosomes.par_iter_mut().for_each(|chr| chr.evaluate(decoder));
    } else {
        for chr in chromosomes.iter_mut() {
            chr.evaluate(decoder);
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn decode_all<D: BrkgaDecoder>(decoder: &D, chromosomes: &mut [Chromosome], _parallel: bool) {
    for chr in chromosomes.iter_mut() {
        chr.evaluate(decoder);
    }
}
