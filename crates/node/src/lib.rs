//! Sensor Node
//!
//! Wires synthetic light and temperature sensors, the statistics engine and
//! a reporter into a runnable sampling loop.

use clap::ValueEnum;
use sampler::{
    AdcSensor, EngineConfig, JsonReporter, RelationshipStrategy, Reporter, SamplingLoop, Sensor,
    SyntheticAdc, TextReporter, TracingReporter,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// How tick reports are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Firmware-style text lines on stdout
    Text,
    /// One JSON object per tick on stdout
    Json,
    /// Structured log events
    Log,
}

/// Relationship override from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RelationshipArg {
    None,
    Correlation,
    Regression,
}

impl From<RelationshipArg> for RelationshipStrategy {
    fn from(arg: RelationshipArg) -> Self {
        match arg {
            RelationshipArg::None => RelationshipStrategy::None,
            RelationshipArg::Correlation => RelationshipStrategy::Correlation,
            RelationshipArg::Regression => RelationshipStrategy::Regression,
        }
    }
}

/// Initialize logging, `RUST_LOG` overrides the default `info` level
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {}", e))
}

/// Create the reporter for an output format
pub fn build_reporter(format: OutputFormat) -> Box<dyn Reporter> {
    match format {
        OutputFormat::Text => Box::new(TextReporter::new(std::io::stdout())),
        OutputFormat::Json => Box::new(JsonReporter::new(std::io::stdout())),
        OutputFormat::Log => Box::new(TracingReporter),
    }
}

/// Build a sampling loop fed by the synthetic on-board sensors
pub fn build_sampling_loop(
    config: &EngineConfig,
    reporter: Box<dyn Reporter>,
) -> anyhow::Result<SamplingLoop> {
    let light: Box<dyn Sensor> = Box::new(AdcSensor::light(SyntheticAdc::light()));
    let temperature: Option<Box<dyn Sensor>> = if config.track_secondary {
        Some(Box::new(AdcSensor::temperature(SyntheticAdc::temperature())))
    } else {
        None
    };

    info!(
        "Sampling light{} at {} Hz",
        if config.track_secondary { " and temperature" } else { "" },
        config.samples_per_second
    );
    Ok(SamplingLoop::new(config, light, temperature, reporter)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_arg_mapping() {
        assert_eq!(
            RelationshipStrategy::from(RelationshipArg::Regression),
            RelationshipStrategy::Regression
        );
        assert_eq!(
            RelationshipStrategy::from(RelationshipArg::None),
            RelationshipStrategy::None
        );
    }

    #[test]
    fn test_primary_only_loop() {
        let config = EngineConfig {
            track_secondary: false,
            ..EngineConfig::deviation_only()
        };
        let mut sampling = build_sampling_loop(&config, Box::new(TracingReporter)).unwrap();

        let report = sampling.tick().unwrap().unwrap();
        assert!(report.secondary.is_none());
        assert!(report.primary[0] > 0.0);
    }

    #[test]
    fn test_invalid_combination_rejected() {
        let config = EngineConfig {
            track_secondary: false,
            ..EngineConfig::correlation()
        };
        assert!(build_sampling_loop(&config, Box::new(TracingReporter)).is_err());
    }
}
