//! Evolutionary parameter tuples and the grid they are drawn from.

use crate::error::{BrkgaError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One BRKGA parameter configuration.
///
/// The derived counts truncate toward zero:
/// `elite_count = floor(p * pe)`, `mutant_count = floor(p * pm)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrkgaParams {
    /// Number of chromosomes in the population.
    pub population_size: usize,

    /// Fraction of the population kept as elite.
    pub elite_fraction: f64,

    /// Fraction of the population replaced by mutants.
    pub mutant_fraction: f64,

    /// Probability that an offspring inherits a key from its elite parent.
    pub crossover_bias: f64,
}

impl BrkgaParams {
    pub fn new(
        population_size: usize,
        elite_fraction: f64,
        mutant_fraction: f64,
        crossover_bias: f64,
    ) -> Self {
        Self {
            population_size,
            elite_fraction,
            mutant_fraction,
            crossover_bias,
        }
    }

    /// Number of elite chromosomes, `floor(p * pe)`.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_fraction) as usize
    }

    /// Number of mutants, `floor(p * pm)`.
    pub fn mutant_count(&self) -> usize {
        (self.population_size as f64 * self.mutant_fraction) as usize
    }

    /// Checks that a generation can run with these parameters.
    ///
    /// A generation needs at least one elite and one non-elite chromosome
    /// to pick crossover parents from.
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| self.invalid(reason);

        let in_open_unit = |x: f64| x > 0.0 && x < 1.0;
        if !in_open_unit(self.elite_fraction) {
            return Err(fail("elite_fraction must be in (0, 1)".into()));
        }
        if !in_open_unit(self.mutant_fraction) {
            return Err(fail("mutant_fraction must be in (0, 1)".into()));
        }
        if !in_open_unit(self.crossover_bias) {
            return Err(fail("crossover_bias must be in (0, 1)".into()));
        }
        if self.elite_fraction + self.mutant_fraction >= 1.0 {
            return Err(fail("elite_fraction + mutant_fraction must be < 1.0".into()));
        }
        let elite = self.elite_count();
        if elite == 0 {
            return Err(fail("population too small: no elite chromosomes".into()));
        }
        if elite >= self.population_size {
            return Err(fail("population too small: no non-elite chromosomes".into()));
        }
        Ok(())
    }

    /// Error describing why this tuple was rejected.
    pub(crate) fn invalid(&self, reason: String) -> BrkgaError {
        BrkgaError::InvalidParameters {
            population_size: self.population_size,
            elite_fraction: self.elite_fraction,
            mutant_fraction: self.mutant_fraction,
            crossover_bias: self.crossover_bias,
            reason,
        }
    }
}

/// Discrete value lists for each parameter.
///
/// Offline control uses the first value of every list; Q-learning control
/// builds one state per element of the Cartesian product.
///
/// # Examples
///
/// ```
/// use adaptive_brkga::brkga::ParameterGrid;
///
/// let grid = ParameterGrid::new(
///     vec![100, 200, 400],
///     vec![0.10, 0.20],
///     vec![0.05, 0.15],
///     vec![0.60, 0.70, 0.80],
/// );
/// assert_eq!(grid.len(), 36);
/// assert!(grid.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterGrid {
    pub population_sizes: Vec<usize>,
    pub elite_fractions: Vec<f64>,
    pub mutant_fractions: Vec<f64>,
    pub crossover_biases: Vec<f64>,
}

impl ParameterGrid {
    pub fn new(
        population_sizes: Vec<usize>,
        elite_fractions: Vec<f64>,
        mutant_fractions: Vec<f64>,
        crossover_biases: Vec<f64>,
    ) -> Self {
        Self {
            population_sizes,
            elite_fractions,
            mutant_fractions,
            crossover_biases,
        }
    }

    /// A grid holding exactly one tuple.
    pub fn fixed(params: BrkgaParams) -> Self {
        Self::new(
            vec![params.population_size],
            vec![params.elite_fraction],
            vec![params.mutant_fraction],
            vec![params.crossover_bias],
        )
    }

    /// Number of tuples in the Cartesian product.
    pub fn len(&self) -> usize {
        self.population_sizes.len()
            * self.elite_fractions.len()
            * self.mutant_fractions.len()
            * self.crossover_biases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The tuple made of the first value of every list.
    ///
    /// Returns `None` if any list is empty.
    pub fn first(&self) -> Option<BrkgaParams> {
        Some(BrkgaParams::new(
            *self.population_sizes.first()?,
            *self.elite_fractions.first()?,
            *self.mutant_fractions.first()?,
            *self.crossover_biases.first()?,
        ))
    }

    /// All tuples, population size varying slowest and bias fastest.
    pub fn combinations(&self) -> Vec<BrkgaParams> {
        let mut out = Vec::with_capacity(self.len());
        for &p in &self.population_sizes {
            for &pe in &self.elite_fractions {
                for &pm in &self.mutant_fractions {
                    for &rhoe in &self.crossover_biases {
                        out.push(BrkgaParams::new(p, pe, pm, rhoe));
                    }
                }
            }
        }
        out
    }

    /// Checks that no list is empty and every tuple is usable.
    pub fn validate(&self) -> Result<()> {
        let lists = [
            ("population_sizes", self.population_sizes.is_empty()),
            ("elite_fractions", self.elite_fractions.is_empty()),
            ("mutant_fractions", self.mutant_fractions.is_empty()),
            ("crossover_biases", self.crossover_biases.is_empty()),
        ];
        if let Some(&(parameter, _)) = lists.iter().find(|(_, empty)| *empty) {
            return Err(BrkgaError::EmptyParameterList { parameter });
        }
        for params in self.combinations() {
            params.validate()?;
        }
        Ok(())
    }
}
