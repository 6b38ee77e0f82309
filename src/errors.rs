use thiserror::Error;

use crate::utils::units::UnitError;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Numeric divergence: no convergence after {iterations} iterations (residual {residual:e})")]
    NumericDivergence { iterations: usize, residual: f64 },

    #[error("Simulation time exceeded: grains still burning after {limit} s")]
    TimeExceeded { limit: f64 },

    #[error("Simulation cancelled after {elapsed:.3} s")]
    Cancelled { elapsed: f64 },

    #[error(transparent)]
    Units(#[from] UnitError),
}

pub type SimulationResult<T> = Result<T, SimulationError>;
