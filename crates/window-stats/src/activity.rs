//! Activity Tier Classification

use crate::StatsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Activity tier derived from window dispersion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityTier {
    /// Calm signal, compressed hardest
    Low,
    /// Moderate signal, block-compressed
    Medium,
    /// Volatile signal, reported at full resolution
    High,
}

impl fmt::Display for ActivityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityTier::Low => write!(f, "Low Activity"),
            ActivityTier::Medium => write!(f, "Medium Activity"),
            ActivityTier::High => write!(f, "High Activity"),
        }
    }
}

/// Classify a dispersion value.
///
/// `deviation == low` is `Low`, `deviation == high` is `Medium`.
pub fn classify(deviation: f64, low: f64, high: f64) -> ActivityTier {
    if deviation <= low {
        ActivityTier::Low
    } else if deviation > high {
        ActivityTier::High
    } else {
        ActivityTier::Medium
    }
}

/// Validated pair of tier thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityThresholds {
    low: f64,
    high: f64,
}

impl ActivityThresholds {
    /// Create thresholds, rejecting `low >= high` and non-finite values
    pub fn new(low: f64, high: f64) -> Result<Self, StatsError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(StatsError::Configuration(format!(
                "activity thresholds must be finite (low={}, high={})",
                low, high
            )));
        }
        if low >= high {
            return Err(StatsError::Configuration(format!(
                "low activity threshold {} must be below high threshold {}",
                low, high
            )));
        }
        Ok(Self { low, high })
    }

    /// Get the low threshold
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Get the high threshold
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Classify a dispersion value against these thresholds
    pub fn classify(&self, deviation: f64) -> ActivityTier {
        classify(deviation, self.low, self.high)
    }
}

impl Default for ActivityThresholds {
    fn default() -> Self {
        Self {
            low: 1000.0,
            high: 3000.0,
        }
    }
}
