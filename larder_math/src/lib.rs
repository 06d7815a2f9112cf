//! # Larder Math
//!
//! Statistical calculations for inventory and sales series.
//! Every function in this crate is pure: it reads the slice it is given,
//! never mutates it, and degrades to documented zero/empty results when a
//! series is too short for a meaningful answer.
//!
//! ```
//! use larder_math::descriptive::descriptive_stats;
//! use larder_math::trend::{analyze_trend, TrendDirection};
//!
//! let sales = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = descriptive_stats(&sales);
//! assert_eq!(stats.mean, 3.0);
//!
//! let trend = analyze_trend(&sales);
//! assert_eq!(trend.trend_direction, TrendDirection::Growth);
//! ```

use thiserror::Error;

// Analysis modules
pub mod anomaly;
pub mod descriptive;
pub mod distribution;
pub mod forecasting;
pub mod seasonality;
pub mod trend;

/// Errors that can occur in statistical calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for statistical operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Reject series containing NaN or infinite values.
///
/// The analysis functions assume finite input; callers that accept data from
/// outside the process should run this first.
pub fn validate_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(MathError::InvalidInput(format!(
            "Value at index {} is not finite ({})",
            index, values[index]
        ))),
        None => Ok(()),
    }
}

/// Arithmetic mean, 0 for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Every value compares equal to the first. Empty slices count as constant.
///
/// Floating-point means of repeated decimals like `0.1` drift by a few ULPs,
/// so spread-based checks (`std == 0`) miss them; this one does not.
pub(crate) fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// Ascending copy of the input; the caller's slice is left untouched.
pub(crate) fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}
