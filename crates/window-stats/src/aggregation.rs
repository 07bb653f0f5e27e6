//! Tiered Window Aggregation

use crate::activity::ActivityTier;
use crate::statistics::mean;
use crate::StatsError;
use serde::Serialize;
use tracing::debug;

/// Number of blocks a medium-activity window is reduced to
const MEDIUM_BLOCKS: usize = 3;

/// Reduced view of a full window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    /// Tier that selected the reduction
    pub tier: ActivityTier,
    /// Samples folded into each output value
    pub group_size: usize,
    /// Output values, in window order
    pub values: Vec<f64>,
}

impl Aggregation {
    /// Human-readable reduction label, e.g. "4-into-1" or "None"
    pub fn label(&self) -> String {
        match self.tier {
            ActivityTier::High => "None".to_string(),
            _ => format!("{}-into-1", self.group_size),
        }
    }
}

/// Reduces full windows according to their activity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    capacity: usize,
    block_size: usize,
}

impl Aggregator {
    /// Create an aggregator for windows of `capacity` slots.
    ///
    /// The capacity must split evenly into three medium-tier blocks.
    pub fn new(capacity: usize) -> Result<Self, StatsError> {
        if capacity == 0 || capacity % MEDIUM_BLOCKS != 0 {
            return Err(StatsError::Configuration(format!(
                "window capacity {} is not divisible into {} blocks",
                capacity, MEDIUM_BLOCKS
            )));
        }
        Ok(Self {
            capacity,
            block_size: capacity / MEDIUM_BLOCKS,
        })
    }

    /// Get the window capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the medium-tier block size
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Reduce a newest-first window snapshot
    pub fn aggregate(&self, tier: ActivityTier, window: &[f64]) -> Result<Aggregation, StatsError> {
        if window.len() != self.capacity {
            return Err(StatsError::LengthMismatch {
                expected: self.capacity,
                actual: window.len(),
            });
        }

        let aggregation = match tier {
            ActivityTier::Low => Aggregation {
                tier,
                group_size: self.capacity,
                values: vec![mean(window)],
            },
            ActivityTier::Medium => Aggregation {
                tier,
                group_size: self.block_size,
                values: window.chunks(self.block_size).map(mean).collect(),
            },
            ActivityTier::High => Aggregation {
                tier,
                group_size: 1,
                values: window.to_vec(),
            },
        };

        debug!(
            "Aggregated {} samples into {} ({})",
            window.len(),
            aggregation.values.len(),
            aggregation.label()
        );
        Ok(aggregation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descending() -> Vec<f64> {
        (1..=12).rev().map(|v| v as f64).collect()
    }

    #[test]
    fn test_low_tier_mean() {
        let aggregator = Aggregator::new(12).unwrap();
        let window: Vec<f64> = (1..=12).map(|v| v as f64).collect();
        let result = aggregator.aggregate(ActivityTier::Low, &window).unwrap();

        assert_eq!(result.values, vec![6.5]);
        assert_eq!(result.label(), "12-into-1");
    }

    #[test]
    fn test_medium_tier_block_means() {
        let aggregator = Aggregator::new(12).unwrap();
        let result = aggregator.aggregate(ActivityTier::Medium, &descending()).unwrap();

        assert_eq!(result.values, vec![10.5, 6.5, 2.5]);
        assert_eq!(result.group_size, 4);
        assert_eq!(result.label(), "4-into-1");
    }

    #[test]
    fn test_high_tier_passthrough() {
        let aggregator = Aggregator::new(12).unwrap();
        let result = aggregator.aggregate(ActivityTier::High, &descending()).unwrap();

        assert_eq!(result.values, descending());
        assert_eq!(result.label(), "None");
    }

    #[test]
    fn test_other_capacities() {
        let aggregator = Aggregator::new(6).unwrap();
        let window = [6.0, 4.0, 3.0, 1.0, 0.0, 2.0];
        let result = aggregator.aggregate(ActivityTier::Medium, &window).unwrap();
        assert_eq!(result.values, vec![5.0, 2.0, 1.0]);
    }

    #[test]
    fn test_indivisible_capacity_rejected() {
        assert!(matches!(Aggregator::new(10), Err(StatsError::Configuration(_))));
        assert!(Aggregator::new(0).is_err());
    }

    #[test]
    fn test_length_mismatch() {
        let aggregator = Aggregator::new(12).unwrap();
        assert_eq!(
            aggregator.aggregate(ActivityTier::Low, &[1.0, 2.0, 3.0]),
            Err(StatsError::LengthMismatch { expected: 12, actual: 3 })
        );
    }
}
