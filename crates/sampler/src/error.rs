//! Sampler Error Types

use sliding_window::WindowError;
use thiserror::Error;
use window_stats::StatsError;

/// Errors raised while configuring or running the sampling loop
#[derive(Debug, Error)]
pub enum SamplerError {
    /// Configuration could not be loaded
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    /// Configuration loaded but rejected at start-up
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Statistics engine error
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// Sample rejected by a window
    #[error(transparent)]
    Window(#[from] WindowError),

    /// Sensor acquisition failed
    #[error("Sensor {sensor} read failed: {reason}")]
    Sensor { sensor: String, reason: String },

    /// Reporter could not write its output
    #[error("Report output failed: {0}")]
    Io(#[from] std::io::Error),

    /// Reporter could not encode a tick
    #[error("Report encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
