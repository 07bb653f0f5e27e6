//! Dispersion Statistics

use serde::Serialize;

/// Summary statistics over every slot of a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WindowStatistics {
    /// Mean value
    pub mean: f64,
    /// Population variance (divides by N)
    pub variance: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
}

impl WindowStatistics {
    /// Compute statistics from a slice of values
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);

        let sum_of_squares: f64 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
        let variance = sum_of_squares / n;

        Self {
            mean,
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation over all values
pub fn standard_deviation(values: &[f64]) -> f64 {
    WindowStatistics::compute(values).std_dev
}
