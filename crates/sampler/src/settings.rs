//! Engine settings

use crate::SamplerError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use sliding_window::DEFAULT_CAPACITY;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use window_stats::{ActivityThresholds, Aggregator, RelationshipStrategy};

/// Prefix for environment overrides, e.g. `SENSOR_NODE_LOW_THRESHOLD`
const ENV_PREFIX: &str = "SENSOR_NODE";

/// Statistics engine and sampling loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window capacity in samples (must split into three blocks)
    pub capacity: usize,

    /// Deviation at or below which activity is low
    pub low_threshold: f64,

    /// Deviation above which activity is high
    pub high_threshold: f64,

    /// Sampling rate in Hz
    pub samples_per_second: f64,

    /// Relationship computed between primary and secondary windows
    pub relationship: RelationshipStrategy,

    /// Whether a secondary quantity is sampled alongside the primary one
    pub track_secondary: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            low_threshold: 1000.0,
            high_threshold: 3000.0,
            samples_per_second: 2.0,
            relationship: RelationshipStrategy::Correlation,
            track_secondary: true,
        }
    }
}

impl EngineConfig {
    /// Light/temperature correlation node
    pub fn correlation() -> Self {
        Self::default()
    }

    /// Deviation and aggregation only, secondary window still tracked
    pub fn deviation_only() -> Self {
        Self {
            relationship: RelationshipStrategy::None,
            ..Default::default()
        }
    }

    /// Light/temperature regression node
    pub fn regression() -> Self {
        Self {
            relationship: RelationshipStrategy::Regression,
            ..Default::default()
        }
    }

    /// Load defaults, then an optional file, then `SENSOR_NODE_*` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, SamplerError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        let config: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<(), SamplerError> {
        Aggregator::new(self.capacity)?;
        ActivityThresholds::new(self.low_threshold, self.high_threshold)?;

        if !self.samples_per_second.is_finite() || self.samples_per_second <= 0.0 {
            return Err(SamplerError::InvalidConfig(format!(
                "samples_per_second must be positive, got {}",
                self.samples_per_second
            )));
        }

        if self.relationship != RelationshipStrategy::None && !self.track_secondary {
            return Err(SamplerError::InvalidConfig(format!(
                "{:?} relationship requires a secondary window",
                self.relationship
            )));
        }

        Ok(())
    }

    /// Interval between ticks
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.samples_per_second)
    }
}
