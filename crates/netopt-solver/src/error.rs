//! Solver construction errors.

use netopt_config::ConfigError;
use netopt_core::NetworkError;
use thiserror::Error;

/// Errors raised while building a solver from configuration.
///
/// Solving itself does not fail; contract violations inside the search
/// panic.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("no problem configured")]
    MissingProblem,
}

/// Result type for solver construction.
pub type Result<T> = std::result::Result<T, SolverError>;
