//! Sliding-Window Statistics Engine

use crate::report::{RelationshipOutcome, TickReport, WindowSummary};
use crate::settings::EngineConfig;
use crate::SamplerError;
use sliding_window::{SlidingWindow, WindowError};
use tracing::{debug, info, warn};
use window_stats::{
    ActivityThresholds, Aggregator, RelationshipAnalyzer, RelationshipStrategy, StatsError,
    WindowStatistics,
};

/// Owns the sample windows and turns each tick's samples into a report
pub struct StatisticsEngine {
    /// Window the tiers and aggregation are computed on
    primary: SlidingWindow,
    /// Optional parallel window for relationship analysis
    secondary: Option<SlidingWindow>,
    thresholds: ActivityThresholds,
    aggregator: Aggregator,
    analyzer: RelationshipAnalyzer,
    /// Ticks ingested so far
    tick: u64,
}

impl StatisticsEngine {
    /// Build an engine, rejecting invalid configuration
    pub fn new(config: &EngineConfig) -> Result<Self, SamplerError> {
        config.validate()?;

        let secondary = if config.track_secondary {
            Some(SlidingWindow::new(config.capacity)?)
        } else {
            None
        };

        info!(
            "Statistics engine: capacity={}, thresholds={}/{}, relationship={:?}",
            config.capacity, config.low_threshold, config.high_threshold, config.relationship
        );

        Ok(Self {
            primary: SlidingWindow::new(config.capacity)?,
            secondary,
            thresholds: ActivityThresholds::new(config.low_threshold, config.high_threshold)?,
            aggregator: Aggregator::new(config.capacity)?,
            analyzer: RelationshipAnalyzer::new(config.relationship),
            tick: 0,
        })
    }

    /// Check whether a secondary window is tracked
    pub fn tracks_secondary(&self) -> bool {
        self.secondary.is_some()
    }

    /// Get the primary window
    pub fn primary(&self) -> &SlidingWindow {
        &self.primary
    }

    /// Get the secondary window, if tracked
    pub fn secondary(&self) -> Option<&SlidingWindow> {
        self.secondary.as_ref()
    }

    /// Number of ticks ingested
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Push one tick's samples and compute everything that is ready.
    ///
    /// A secondary sample is ignored when no secondary window is tracked. A
    /// missing secondary sample leaves that window untouched. Non-finite
    /// samples reject the whole tick before any window is modified.
    pub fn ingest(&mut self, primary: f64, secondary: Option<f64>) -> Result<TickReport, SamplerError> {
        if !primary.is_finite() {
            return Err(WindowError::NonFiniteSample(primary).into());
        }
        if let Some(value) = secondary.filter(|v| !v.is_finite()) {
            return Err(WindowError::NonFiniteSample(value).into());
        }

        self.primary.push(primary)?;
        if let (Some(window), Some(value)) = (self.secondary.as_mut(), secondary) {
            window.push(value)?;
        }
        self.tick += 1;

        let summary = if self.primary.is_full() {
            Some(self.summarize()?)
        } else {
            debug!(
                "Tick {}: primary window filling ({}/{})",
                self.tick,
                self.primary.len(),
                self.primary.capacity()
            );
            None
        };

        Ok(TickReport {
            tick: self.tick,
            primary: self.primary.snapshot(),
            secondary: self.secondary.as_ref().map(SlidingWindow::snapshot),
            summary,
        })
    }

    fn summarize(&self) -> Result<WindowSummary, SamplerError> {
        let window = self.primary.snapshot();
        let statistics = WindowStatistics::compute(&window);
        let tier = self.thresholds.classify(statistics.std_dev);
        let aggregation = self.aggregator.aggregate(tier, &window)?;

        debug!(
            "Tick {}: std_dev={:.3}, tier={:?}, aggregation={}",
            self.tick,
            statistics.std_dev,
            tier,
            aggregation.label()
        );

        Ok(WindowSummary {
            statistics,
            tier,
            aggregation,
            relationship: self.relate(&window)?,
        })
    }

    fn relate(&self, primary: &[f64]) -> Result<Option<RelationshipOutcome>, SamplerError> {
        if self.analyzer.strategy() == RelationshipStrategy::None {
            return Ok(None);
        }
        let secondary = match self.secondary.as_ref().filter(|w| w.is_full()) {
            Some(window) => window.snapshot(),
            None => return Ok(None),
        };

        match self.analyzer.analyze(primary, &secondary) {
            Ok(result) => Ok(result.map(RelationshipOutcome::Computed)),
            Err(StatsError::DegenerateInput(reason)) => {
                warn!("Tick {}: skipping relationship, {}", self.tick, reason);
                Ok(Some(RelationshipOutcome::Degenerate {
                    reason: reason.to_string(),
                }))
            }
            Err(e) => Err(e.into()),
        }
    }
}
