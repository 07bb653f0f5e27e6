//! Statistics Error Types

use thiserror::Error;

/// Errors raised while configuring or evaluating window statistics
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Mathematical singularity in the current window contents
    #[error("Degenerate input: {0}")]
    DegenerateInput(&'static str),

    /// Invalid start-up configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Window length does not match what the component was built for
    #[error("Window length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
