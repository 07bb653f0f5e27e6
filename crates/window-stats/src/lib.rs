//! Window Statistics Engine
//!
//! Computes dispersion, activity tiers, tiered aggregation and pairwise
//! relationships over fixed-capacity sample windows.

mod activity;
mod aggregation;
mod error;
mod relationship;
mod statistics;

pub use activity::{classify, ActivityThresholds, ActivityTier};
pub use aggregation::{Aggregation, Aggregator};
pub use error::StatsError;
pub use relationship::{
    linear_regression, pearson_correlation, RegressionFit, RelationshipAnalyzer,
    RelationshipResult, RelationshipStrategy,
};
pub use statistics::{mean, standard_deviation, WindowStatistics};
