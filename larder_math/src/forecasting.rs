//! Short-horizon forecasting with simple exponential smoothing
//!
//! The forecast is flat: every future step repeats the last smoothed level.
//! Confidence is derived from the one-step smoothing residuals relative to
//! the series mean.

use crate::{mean, MathError, Result};
use serde::{Deserialize, Serialize};

/// Default number of future steps
pub const DEFAULT_HORIZON: usize = 7;

/// Default smoothing factor
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Shortest series that is forecast
pub const MIN_FORECAST_LENGTH: usize = 3;

/// Method that produced a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    ExponentialSmoothing,
    #[default]
    InsufficientData,
}

impl std::fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExponentialSmoothing => write!(f, "exponential_smoothing"),
            Self::InsufficientData => write!(f, "insufficient_data"),
        }
    }
}

/// Result of a forecast
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    /// Predicted values, one per future step
    pub next_period: Vec<f64>,
    /// Fit quality in [0, 100]
    pub confidence: f64,
    pub method: ForecastMethod,
    /// Mirrors `confidence`
    pub accuracy: f64,
}

/// Simple exponential smoothing state
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
    level: Option<f64>,
    values_seen: usize,
}

impl ExponentialSmoothing {
    /// Create a new Exponential Smoothing with the specified alpha (smoothing factor)
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(MathError::InvalidInput(
                "Alpha must be between 0 and 1 (exclusive)".to_string(),
            ));
        }

        Ok(Self {
            alpha,
            level: None,
            values_seen: 0,
        })
    }

    /// Feed the next observation and return the updated level
    pub fn update(&mut self, value: f64) -> f64 {
        self.values_seen += 1;

        let level = match self.level {
            None => value,
            Some(previous) => self.alpha * value + (1.0 - self.alpha) * previous,
        };
        self.level = Some(level);
        level
    }

    /// Get the current smoothed value
    pub fn value(&self) -> Result<f64> {
        self.level.ok_or_else(|| {
            MathError::InsufficientData("No data available for exponential smoothing".to_string())
        })
    }

    /// Smoothed level for every prefix of `values`
    pub fn smooth(&mut self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.update(v)).collect()
    }

    /// Get the current alpha value
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of observations seen since creation or the last reset
    pub fn values_seen(&self) -> usize {
        self.values_seen
    }

    /// Reset the Exponential Smoothing, clearing all values
    pub fn reset(&mut self) {
        self.level = None;
        self.values_seen = 0;
    }
}

/// Forecast `horizon` steps with smoothing factor `alpha`.
///
/// Series shorter than three points produce an empty forecast labelled
/// `insufficient_data`. Fails only when `alpha` is outside (0, 1).
pub fn forecast_exponential_smoothing(
    values: &[f64],
    horizon: usize,
    alpha: f64,
) -> Result<ForecastResult> {
    let mut smoother = ExponentialSmoothing::new(alpha)?;

    if values.len() < MIN_FORECAST_LENGTH {
        return Ok(ForecastResult::default());
    }

    let smoothed = smoother.smooth(values);
    let last_level = smoother.value()?;

    let mae = values[1..]
        .iter()
        .zip(&smoothed[1..])
        .map(|(actual, level)| (actual - level).abs())
        .sum::<f64>()
        / (values.len() - 1) as f64;

    let confidence = residual_confidence(mae, mean(values));

    tracing::debug!(alpha, horizon, level = last_level, mae, confidence, "forecast computed");

    Ok(ForecastResult {
        next_period: vec![last_level; horizon],
        confidence,
        method: ForecastMethod::ExponentialSmoothing,
        accuracy: confidence,
    })
}

/// `100 - mae / mean * 100`, clamped to [0, 100].
///
/// A zero mean has no meaningful relative error and yields 0.
fn residual_confidence(mae: f64, series_mean: f64) -> f64 {
    if series_mean == 0.0 {
        tracing::warn!("series mean is zero, forecast confidence set to 0");
        return 0.0;
    }
    (100.0 - mae / series_mean * 100.0).clamp(0.0, 100.0)
}
