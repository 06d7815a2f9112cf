//! Linear trend classification
//!
//! Fits an ordinary least squares line of value against index and labels the
//! series as growing, declining or stable. Seasonality is reported alongside.

use crate::is_constant;
use crate::seasonality::{detect_seasonality_with, SeasonalityParams, SeasonalityResult};
use serde::{Deserialize, Serialize};

/// Slopes with a smaller magnitude are classified as stable
pub const DEFAULT_STABLE_SLOPE: f64 = 0.1;

/// Shortest series for which a trend is fitted
pub const MIN_TREND_LENGTH: usize = 3;

/// Direction of a fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Growth,
    Decline,
    #[default]
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Growth => write!(f, "growth"),
            Self::Decline => write!(f, "decline"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// Trend classification for a series
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub trend_direction: TrendDirection,
    /// `|correlation| * 100`, in [0, 100]
    pub trend_strength: f64,
    /// Pearson correlation of value against index, in [-1, 1]
    pub correlation: f64,
    /// Least squares slope per index step
    pub slope: f64,
    pub seasonality: SeasonalityResult,
}

/// Parameters for trend analysis
#[derive(Debug, Clone, PartialEq)]
pub struct TrendParams {
    pub stable_slope: f64,
    pub seasonality: SeasonalityParams,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            stable_slope: DEFAULT_STABLE_SLOPE,
            seasonality: SeasonalityParams::default(),
        }
    }
}

/// Analyze the trend with default parameters.
pub fn analyze_trend(values: &[f64]) -> TrendResult {
    analyze_trend_with(values, &TrendParams::default())
}

/// Analyze the trend with explicit parameters.
///
/// Series shorter than three points are reported as stable with zero
/// strength, zero correlation and no seasonality.
pub fn analyze_trend_with(values: &[f64], params: &TrendParams) -> TrendResult {
    if values.len() < MIN_TREND_LENGTH {
        return TrendResult::default();
    }

    let slope = linear_slope(values);
    let correlation = index_correlation(values);

    let trend_direction = if slope.abs() < params.stable_slope {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Growth
    } else {
        TrendDirection::Decline
    };

    TrendResult {
        trend_direction,
        trend_strength: correlation.abs() * 100.0,
        correlation,
        slope,
        seasonality: detect_seasonality_with(values, &params.seasonality),
    }
}

/// Least squares slope of value against index `0..n`.
///
/// Returns 0 for fewer than two points.
pub fn linear_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 2 {
        return 0.0;
    }

    let sum_x = n * (n - 1.0) / 2.0;
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, &y)| i as f64 * y).sum();
    let sum_x2: f64 = (0..values.len()).map(|i| (i as f64).powi(2)).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}

/// Pearson correlation of the values with their indices.
pub fn index_correlation(values: &[f64]) -> f64 {
    let x: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    pearson_correlation(&x, values)
}

/// Pearson correlation coefficient, clamped to [-1, 1].
///
/// Returns 0 for mismatched or empty inputs and when either side is
/// constant.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || is_constant(x) || is_constant(y) {
        return 0.0;
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let spread = (n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y);
    if spread <= 0.0 {
        return 0.0;
    }

    (numerator / spread.sqrt()).clamp(-1.0, 1.0)
}
