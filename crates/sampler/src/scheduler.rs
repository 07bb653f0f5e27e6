//! Periodic Sampling Loop

use crate::engine::StatisticsEngine;
use crate::report::{Reporter, TickReport};
use crate::sensor::Sensor;
use crate::settings::EngineConfig;
use crate::SamplerError;
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Single-task loop: acquire, ingest, report, wait for the next tick
pub struct SamplingLoop {
    engine: StatisticsEngine,
    primary: Box<dyn Sensor>,
    secondary: Option<Box<dyn Sensor>>,
    reporter: Box<dyn Reporter>,
    period: Duration,
}

impl SamplingLoop {
    /// Create a loop; a secondary sensor is required exactly when the
    /// configuration tracks a secondary window
    pub fn new(
        config: &EngineConfig,
        primary: Box<dyn Sensor>,
        secondary: Option<Box<dyn Sensor>>,
        reporter: Box<dyn Reporter>,
    ) -> Result<Self, SamplerError> {
        let engine = StatisticsEngine::new(config)?;

        if engine.tracks_secondary() != secondary.is_some() {
            return Err(SamplerError::InvalidConfig(format!(
                "track_secondary={} but secondary sensor {}",
                config.track_secondary,
                if secondary.is_some() { "given" } else { "missing" }
            )));
        }

        Ok(Self {
            engine,
            primary,
            secondary,
            reporter,
            period: config.tick_period(),
        })
    }

    /// Get the engine
    pub fn engine(&self) -> &StatisticsEngine {
        &self.engine
    }

    /// Interval between ticks
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run one tick synchronously.
    ///
    /// Returns `Ok(None)` when acquisition failed and the tick was skipped.
    pub fn tick(&mut self) -> Result<Option<TickReport>, SamplerError> {
        let samples = self.acquire().and_then(|(primary, secondary)| {
            self.engine.ingest(primary, secondary)
        });

        let report = match samples {
            Ok(report) => report,
            Err(e @ (SamplerError::Sensor { .. } | SamplerError::Window(_))) => {
                warn!("Skipping tick: {}", e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        self.reporter.report(&report)?;
        Ok(Some(report))
    }

    fn acquire(&mut self) -> Result<(f64, Option<f64>), SamplerError> {
        let primary = self.primary.read()?;
        let secondary = match self.secondary.as_mut() {
            Some(sensor) => Some(sensor.read()?),
            None => None,
        };
        debug!("Acquired {}={} secondary={:?}", self.primary.name(), primary, secondary);
        Ok((primary, secondary))
    }

    /// Tick every period until `shutdown` resolves or `max_ticks` ticks have
    /// elapsed. The first tick fires one period after start. Returns the
    /// number of ticks elapsed, skipped ones included.
    pub async fn run<F>(&mut self, shutdown: F, max_ticks: Option<u64>) -> Result<u64, SamplerError>
    where
        F: Future<Output = ()>,
    {
        info!(
            "Starting sampling loop: period={:?}, max_ticks={:?}",
            self.period, max_ticks
        );

        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut elapsed = 0u64;
        while max_ticks.map_or(true, |max| elapsed < max) {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                _ = interval.tick() => {
                    self.tick()?;
                    elapsed += 1;
                }
            }
        }

        info!("Sampling loop stopped after {} ticks", elapsed);
        Ok(elapsed)
    }
}
