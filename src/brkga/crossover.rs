//! Parametric uniform crossover (PUX).
//!
//! One parent comes from the elite pool, one from the non-elite pool, and
//! each key is inherited from the elite parent with probability `rhoe`.

use super::chromosome::Chromosome;
use rand::Rng;

/// Builds one unevaluated offspring from `population`.
///
/// The elite parent is drawn uniformly from `[0, elite_size)` and the
/// non-elite parent from `[elite_size, population.len())`.
///
/// # Panics
/// Panics if either pool is empty.
pub fn parametric_uniform_crossover<R: Rng>(
    population: &[Chromosome],
    elite_size: usize,
    rhoe: f64,
    n: usize,
    rng: &mut R,
) -> Chromosome {
    let elite_idx = rng.random_range(0..elite_size);
    let nonelite_idx = rng.random_range(elite_size..population.len());

    let draws: Vec<f64> = (0..n).map(|_| rng.random_range(0.0..1.0)).collect();
    Chromosome::new(mate(
        &population[elite_idx].keys,
        &population[nonelite_idx].keys,
        rhoe,
        draws,
    ))
}

/// Gene-by-gene selection under a given sequence of uniform draws.
///
/// Key `j` comes from `elite` when `draws[j] < rhoe`, otherwise from
/// `non_elite`. The output is as long as the shortest of the three inputs.
pub fn mate<I>(elite: &[f64], non_elite: &[f64], rhoe: f64, draws: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    elite
        .iter()
        .zip(non_elite)
        .zip(draws)
        .map(|((&e, &ne), u)| if u < rhoe { e } else { ne })
        .collect()
}
