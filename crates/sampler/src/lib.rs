//! Sensor Sampling Loop
//!
//! Drives the sliding-window statistics engine from periodic sensor reads
//! and hands every tick's structured results to a reporter.

pub mod conversion;
mod engine;
mod error;
mod report;
mod scheduler;
mod sensor;
mod settings;

pub use engine::StatisticsEngine;
pub use error::SamplerError;
pub use report::{
    fixed_point, JsonReporter, RelationshipOutcome, Reporter, TextReporter, TickReport,
    TracingReporter, WindowSummary,
};
pub use scheduler::SamplingLoop;
pub use sensor::{AdcSensor, AdcSource, ScriptedSensor, Sensor, SyntheticAdc};
pub use settings::EngineConfig;

pub use window_stats::{ActivityTier, RelationshipResult, RelationshipStrategy};
