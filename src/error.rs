//! Error types for adaptive-brkga.
//!
//! Only configuration problems are errors. Cancellation is reported
//! through [`crate::brkga::BrkgaResult::cancelled`], not through this type.

use thiserror::Error;

/// Error returned when a run cannot start.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BrkgaError {
    /// One of the parameter grid's value lists is empty.
    #[error("parameter list `{parameter}` is empty")]
    EmptyParameterList {
        /// Name of the empty list.
        parameter: &'static str,
    },

    /// A parameter tuple cannot drive a generation.
    #[error(
        "invalid parameters (p={population_size}, pe={elite_fraction}, \
         pm={mutant_fraction}, rhoe={crossover_bias}): {reason}"
    )]
    InvalidParameters {
        population_size: usize,
        elite_fraction: f64,
        mutant_fraction: f64,
        crossover_bias: f64,
        reason: String,
    },

    /// Any other configuration problem.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BrkgaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_display() {
        let err = BrkgaError::EmptyParameterList {
            parameter: "elite_fractions",
        };
        assert_eq!(err.to_string(), "parameter list `elite_fractions` is empty");
    }

    #[test]
    fn test_invalid_parameters_display() {
        let err = BrkgaError::InvalidParameters {
            population_size: 10,
            elite_fraction: 0.6,
            mutant_fraction: 0.5,
            crossover_bias: 0.7,
            reason: "elite_fraction + mutant_fraction must be < 1.0".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid parameters (p=10, pe=0.6, pm=0.5, rhoe=0.7): \
             elite_fraction + mutant_fraction must be < 1.0"
        );
    }
}
