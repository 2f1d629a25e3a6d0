//! Error types for netopt

use thiserror::Error;

/// Main error type for netopt operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Problem definition rejected at construction
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// Element series name not recognised
    #[error("Unknown series: {0}")]
    UnknownSeries(String),

    /// Target is neither a named constant nor a number
    #[error("Unknown target: {0}")]
    UnknownTarget(String),
}

/// Result type alias for netopt operations
pub type Result<T> = std::result::Result<T, NetworkError>;
