//! Sliding Sample Window
//!
//! Provides the fixed-capacity, newest-first sample window that feeds the
//! statistics engine.

mod window;

pub use window::{SlidingWindow, DEFAULT_CAPACITY};

use thiserror::Error;

/// Errors raised by window construction and insertion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WindowError {
    /// A window must hold at least one sample
    #[error("Window capacity must be at least 1")]
    ZeroCapacity,

    /// NaN and infinities are never stored
    #[error("Rejected non-finite sample: {0}")]
    NonFiniteSample(f64),
}
