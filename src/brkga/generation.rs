//! One BRKGA generation.

use super::chromosome::Chromosome;
use super::crossover::parametric_uniform_crossover;
use super::params::BrkgaParams;
use super::population::Population;
use super::types::{BrkgaDecoder, LocalSearch};
use crate::cancel::is_cancelled;
use crate::error::Result;
use rand::Rng;
use std::sync::atomic::AtomicBool;

/// Result of [`evolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GenerationOutcome {
    /// The population was replaced, refined and re-sorted.
    Completed {
        /// Lowest cost among this generation's crossover offspring.
        best_offspring: f64,
    },
    /// The flag was raised mid-generation; the current population was not
    /// touched.
    Cancelled,
}

/// Runs one generation over a sorted population.
///
/// 1. The `floor(p * pe)` elites are copied into the scratch buffer.
/// 2. Slots `[floor(p * pe), p - floor(p * pm))` receive decoded PUX
///    offspring of the current population.
/// 3. Slots `[p - floor(p * pm) - floor(p * pe), p)` receive decoded
///    random mutants.
/// 4. The buffers are swapped, one chromosome at a random index in
///    `[0, floor(p * pe)]` is refined, and the population is re-sorted.
///
/// The mutant range starts `floor(p * pe)` slots before the crossover
/// range ends, so those offspring are overwritten by mutants. The ranges
/// are kept as written; the overlap is a known inconsistency rather than
/// a tuning choice. When `p < 2 * floor(p * pe) + floor(p * pm)` the
/// mutants also replace the tail of the elite copy; slot 0 always survives.
///
/// # Errors
/// Returns [`crate::BrkgaError::InvalidParameters`] if the population does
/// not hold `params.population_size` chromosomes; nothing is decoded then.
pub fn evolve<D, L, R>(
    population: &mut Population,
    params: &BrkgaParams,
    n: usize,
    decoder: &D,
    local_search: &L,
    rng: &mut R,
    cancel: Option<&AtomicBool>,
) -> Result<GenerationOutcome>
where
    D: BrkgaDecoder + ?Sized,
    L: LocalSearch,
    R: Rng,
{
    let p = population.len();
    if p != params.population_size {
        return Err(params.invalid(format!("population holds {p} chromosomes")));
    }
    let elite = params.elite_count();
    let mutants = params.mutant_count();
    let mut best_offspring = f64::INFINITY;

    {
        let (current, next) = population.buffers_mut();
        debug_assert_eq!(current.len(), next.len());

        next[..elite].clone_from_slice(&current[..elite]);

        for slot in &mut next[elite..p - mutants] {
            if is_cancelled(cancel) {
                return Ok(GenerationOutcome::Cancelled);
            }
            let mut child =
                parametric_uniform_crossover(current, elite, params.crossover_bias, n, rng);
            child.evaluate(decoder);
            if child.fitness < best_offspring {
                best_offspring = child.fitness;
            }
            *slot = child;
        }

        for slot in &mut next[p - mutants - elite..] {
            if is_cancelled(cancel) {
                return Ok(GenerationOutcome::Cancelled);
            }
            let mut mutant = Chromosome::random(n, rng);
            mutant.evaluate(decoder);
            *slot = mutant;
        }
    }

    population.swap_buffers();

    let k = rng.random_range(0..=elite);
    local_search.refine(decoder, &mut population.current_mut()[k], rng);

    population.sort();

    Ok(GenerationOutcome::Completed { best_offspring })
}
