//! Tick Reports and Reporters

use crate::SamplerError;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info, warn};
use window_stats::{ActivityTier, Aggregation, RelationshipResult, WindowStatistics};

/// Everything the engine produced for one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    /// 1-based tick number
    pub tick: u64,
    /// Primary window, newest first
    pub primary: Vec<f64>,
    /// Secondary window, newest first
    pub secondary: Option<Vec<f64>>,
    /// Present once the primary window is full
    pub summary: Option<WindowSummary>,
}

/// Statistics over a full primary window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSummary {
    pub statistics: WindowStatistics,
    pub tier: ActivityTier,
    pub aggregation: Aggregation,
    /// Absent when no relationship is configured or the secondary window is not full
    pub relationship: Option<RelationshipOutcome>,
}

/// Relationship analysis outcome for a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RelationshipOutcome {
    Computed(RelationshipResult),
    /// Skipped for this tick because the windows were singular
    Degenerate { reason: String },
}

/// Consumer of per-tick results
pub trait Reporter {
    fn report(&mut self, report: &TickReport) -> Result<(), SamplerError>;
}

/// Format a value as integer part plus three truncated fraction digits
pub fn fixed_point(value: f64) -> String {
    let truncated = (value * 1000.0).trunc() / 1000.0;
    if truncated == 0.0 {
        return "0.000".to_string();
    }
    format!("{:.3}", truncated)
}

fn fixed_point_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|&v| fixed_point(v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Emits each tick as structured `tracing` events
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, report: &TickReport) -> Result<(), SamplerError> {
        debug!(
            tick = report.tick,
            primary = ?report.primary,
            secondary = ?report.secondary,
            "Windows"
        );

        let summary = match &report.summary {
            Some(summary) => summary,
            None => return Ok(()),
        };

        info!(
            tick = report.tick,
            mean = summary.statistics.mean,
            std_dev = summary.statistics.std_dev,
            tier = ?summary.tier,
            aggregation = %summary.aggregation.label(),
            values = ?summary.aggregation.values,
            "Window summary"
        );

        match &summary.relationship {
            Some(RelationshipOutcome::Computed(RelationshipResult::Correlation { coefficient })) => {
                info!(tick = report.tick, coefficient, "Correlation");
            }
            Some(RelationshipOutcome::Computed(RelationshipResult::Regression(fit))) => {
                info!(
                    tick = report.tick,
                    slope = fit.slope,
                    intercept = fit.intercept,
                    mse = fit.mean_squared_error,
                    "Regression"
                );
            }
            Some(RelationshipOutcome::Degenerate { reason }) => {
                warn!(tick = report.tick, %reason, "Relationship skipped");
            }
            None => {}
        }
        Ok(())
    }
}

/// Writes firmware-style text lines
pub struct TextReporter<W: Write> {
    writer: W,
    primary_label: String,
    secondary_label: String,
}

impl<W: Write> TextReporter<W> {
    /// Create a reporter labelling windows `L` (light) and `T` (temperature)
    pub fn new(writer: W) -> Self {
        Self::with_labels(writer, "L", "T")
    }

    /// Create a reporter with custom window labels
    pub fn with_labels(writer: W, primary_label: &str, secondary_label: &str) -> Self {
        Self {
            writer,
            primary_label: primary_label.to_string(),
            secondary_label: secondary_label.to_string(),
        }
    }

    /// Consume the reporter, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, report: &TickReport) -> Result<(), SamplerError> {
        let w = &mut self.writer;
        writeln!(w, "{} = [{}]", self.primary_label, fixed_point_list(&report.primary))?;
        if let Some(secondary) = &report.secondary {
            writeln!(w, "{} = [{}]", self.secondary_label, fixed_point_list(secondary))?;
        }

        if let Some(summary) = &report.summary {
            writeln!(w, "Mean = {}", fixed_point(summary.statistics.mean))?;
            writeln!(w, "StdDev = {}", fixed_point(summary.statistics.std_dev))?;
            writeln!(
                w,
                "Aggregation = {} [{}]",
                summary.aggregation.label(),
                summary.tier
            )?;
            writeln!(w, "X = [{}]", fixed_point_list(&summary.aggregation.values))?;

            match &summary.relationship {
                Some(RelationshipOutcome::Computed(RelationshipResult::Correlation { coefficient })) => {
                    writeln!(w, "Correlation = {}", fixed_point(*coefficient))?;
                }
                Some(RelationshipOutcome::Computed(RelationshipResult::Regression(fit))) => {
                    writeln!(
                        w,
                        "Regression: slope = {}, intercept = {}, MSE = {}",
                        fixed_point(fit.slope),
                        fixed_point(fit.intercept),
                        fixed_point(fit.mean_squared_error)
                    )?;
                }
                Some(RelationshipOutcome::Degenerate { reason }) => {
                    writeln!(w, "Relationship = undefined ({})", reason)?;
                }
                None => {}
            }
        }

        writeln!(w)?;
        w.flush()?;
        Ok(())
    }
}

/// Writes one JSON object per tick
pub struct JsonReporter<W: Write> {
    writer: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, report: &TickReport) -> Result<(), SamplerError> {
        serde_json::to_writer(&mut self.writer, report)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
