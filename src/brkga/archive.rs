//! Elite-solution archive notified on every new best.

use super::chromosome::{by_fitness, Chromosome};
use tracing::trace;

/// Receives every chromosome that becomes the run's new best.
pub trait EliteArchive {
    /// `label` names the method that produced the solution.
    fn record(&mut self, chromosome: &Chromosome, label: &str);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArchive;

impl EliteArchive for NoArchive {
    fn record(&mut self, _chromosome: &Chromosome, _label: &str) {}
}

/// Bounded pool of the best distinct solutions, best first.
///
/// A solution whose keys are already pooled is ignored. When the pool is
/// full, a new solution replaces the worst entry only if it is strictly
/// better.
#[derive(Debug, Clone)]
pub struct SolutionPool {
    capacity: usize,
    entries: Vec<(Chromosome, String)>,
}

impl SolutionPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&Chromosome> {
        self.entries.first().map(|(c, _)| c)
    }

    /// Pooled solutions with the label of the method that found them.
    pub fn iter(&self) -> impl Iterator<Item = (&Chromosome, &str)> {
        self.entries.iter().map(|(c, label)| (c, label.as_str()))
    }
}

impl EliteArchive for SolutionPool {
    fn record(&mut self, chromosome: &Chromosome, label: &str) {
        if self.capacity == 0 || self.entries.iter().any(|(c, _)| c.keys == chromosome.keys) {
            return;
        }
        if self.entries.len() == self.capacity {
            match self.entries.last() {
                Some((worst, _)) if chromosome.fitness < worst.fitness => {
                    self.entries.pop();
                }
                _ => return,
            }
        }
        let pos = self
            .entries
            .partition_point(|(c, _)| by_fitness(c, chromosome).is_le());
        self.entries
            .insert(pos, (chromosome.clone(), label.to_string()));
        trace!(label, fitness = chromosome.fitness, pool = self.entries.len(), "archived solution");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chr(key: f64, fitness: f64) -> Chromosome {
        Chromosome {
            keys: vec![key],
            fitness,
        }
    }

    #[test]
    fn test_pool_sorted_and_bounded() {
        let mut pool = SolutionPool::new(3);
        for (k, f) in [(0.1, 5.0), (0.2, 3.0), (0.3, 4.0), (0.4, 1.0), (0.5, 9.0)] {
            pool.record(&chr(k, f), "BRKGA");
        }
        let costs: Vec<f64> = pool.iter().map(|(c, _)| c.fitness).collect();
        assert_eq!(costs, vec![1.0, 3.0, 4.0]);
        assert_eq!(pool.best().map(|c| c.fitness), Some(1.0));
    }

    #[test]
    fn test_pool_ignores_duplicates() {
        let mut pool = SolutionPool::new(5);
        pool.record(&chr(0.1, 2.0), "BRKGA");
        pool.record(&chr(0.1, 2.0), "BRKGA");
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_pool_keeps_label() {
        let mut pool = SolutionPool::new(2);
        pool.record(&chr(0.7, 1.5), "QL-BRKGA");
        assert_eq!(pool.iter().next().map(|(_, l)| l), Some("QL-BRKGA"));
    }

    #[test]
    fn test_zero_capacity() {
        let mut pool = SolutionPool::new(0);
        pool.record(&chr(0.1, 1.0), "BRKGA");
        assert!(pool.is_empty());
    }
}
