//! Pairwise Relationship Analysis
//!
//! Correlation and ordinary-least-squares regression between two parallel
//! windows of equal length. Both estimators refuse degenerate inputs instead
//! of returning NaN or infinity.

use crate::statistics::mean;
use crate::StatsError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Regression denominator below this fraction of `N·Σx²` counts as zero
const DEGENERACY_TOLERANCE: f64 = 1e-12;

/// Per-sample rounding noise, in ulps of the window magnitude, that a centred
/// deviation may carry when the window is actually constant
const ROUNDING_ULPS: f64 = 16.0;

/// Which relationship to compute between the primary and secondary window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipStrategy {
    /// Deviation and aggregation only
    None,
    /// Pearson correlation coefficient
    #[default]
    Correlation,
    /// Ordinary least squares fit of secondary on primary
    Regression,
}

/// Least-squares line `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
    /// Mean squared residual of the fit
    pub mean_squared_error: f64,
}

/// Result of a relationship computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RelationshipResult {
    Correlation { coefficient: f64 },
    Regression(RegressionFit),
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<(), StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    if x.is_empty() {
        return Err(StatsError::DegenerateInput("empty windows"));
    }
    Ok(())
}

/// Check whether a centred sum of squares is no larger than rounding noise.
///
/// The noise bound follows the largest magnitude in the window, so the
/// check does not change when the data is shifted by a constant.
fn has_no_spread(spread: f64, values: &[f64]) -> bool {
    let magnitude = values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    let noise = ROUNDING_ULPS * f64::EPSILON * magnitude;
    spread <= values.len() as f64 * noise * noise
}

/// Pearson correlation coefficient between two windows
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    check_lengths(x, y)?;

    let mx = mean(x);
    let my = mean(y);

    let mut n = 0.0;
    let mut xx_sum = 0.0;
    let mut yy_sum = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mx;
        let dy = yi - my;
        n += dx * dy;
        xx_sum += dx * dx;
        yy_sum += dy * dy;
    }

    if has_no_spread(xx_sum, x) {
        return Err(StatsError::DegenerateInput("primary window has zero variance"));
    }
    if has_no_spread(yy_sum, y) {
        return Err(StatsError::DegenerateInput("secondary window has zero variance"));
    }

    Ok(n / (xx_sum * yy_sum).sqrt())
}

/// Ordinary least squares fit of `y` on `x`
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<RegressionFit, StatsError> {
    check_lengths(x, y)?;

    let n = x.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        sum_x += xi;
        sum_y += yi;
        sum_xy += xi * yi;
        sum_xx += xi * xi;
    }

    // n * Σ(x - mean)², vanishes when every x is identical
    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() <= DEGENERACY_TOLERANCE * n * sum_xx {
        return Err(StatsError::DegenerateInput("primary window is constant"));
    }

    let intercept = (sum_y * sum_xx - sum_x * sum_xy) / denominator;
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;

    let mean_squared_error = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| {
            let residual = intercept + slope * xi - yi;
            residual * residual
        })
        .sum::<f64>()
        / n;

    Ok(RegressionFit {
        slope,
        intercept,
        mean_squared_error,
    })
}

/// Runs the configured relationship computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelationshipAnalyzer {
    strategy: RelationshipStrategy,
}

impl RelationshipAnalyzer {
    /// Create an analyzer for the given strategy
    pub fn new(strategy: RelationshipStrategy) -> Self {
        Self { strategy }
    }

    /// Get the configured strategy
    pub fn strategy(&self) -> RelationshipStrategy {
        self.strategy
    }

    /// Compute the relationship, `Ok(None)` when the strategy is `None`
    pub fn analyze(&self, x: &[f64], y: &[f64]) -> Result<Option<RelationshipResult>, StatsError> {
        let result = match self.strategy {
            RelationshipStrategy::None => return Ok(None),
            RelationshipStrategy::Correlation => RelationshipResult::Correlation {
                coefficient: pearson_correlation(x, y)?,
            },
            RelationshipStrategy::Regression => {
                RelationshipResult::Regression(linear_regression(x, y)?)
            }
        };

        debug!("Relationship over {} pairs: {:?}", x.len(), result);
        Ok(Some(result))
    }
}
