//! Analysis configuration
//!
//! Every tunable threshold used by the analyzer lives here. Missing JSON
//! fields fall back to the defaults, so a config file only needs the values
//! it changes.

use crate::error::{InsightError, Result};
use chrono::Duration;
use larder_math::anomaly::AnomalyThresholds;
use larder_math::descriptive::QuartileMethod;
use larder_math::distribution::DEFAULT_MAX_BINS;
use larder_math::forecasting::{DEFAULT_ALPHA, DEFAULT_HORIZON};
use larder_math::seasonality::{SeasonalityParams, DEFAULT_PERIODS, DEFAULT_THRESHOLD};
use larder_math::trend::{TrendParams, DEFAULT_STABLE_SLOPE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cache lifetime used by the analyzer's cached entry point (30 minutes)
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 30 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConfig {
    pub forecast_horizon: usize,
    pub smoothing_alpha: f64,
    pub stable_slope_threshold: f64,
    pub seasonality_periods: Vec<usize>,
    pub seasonality_threshold: f64,
    pub anomaly_threshold: f64,
    pub medium_severity: f64,
    pub high_severity: f64,
    pub max_histogram_bins: usize,
    pub quartile_method: QuartileMethod,
    pub cache_ttl_seconds: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let thresholds = AnomalyThresholds::default();
        Self {
            forecast_horizon: DEFAULT_HORIZON,
            smoothing_alpha: DEFAULT_ALPHA,
            stable_slope_threshold: DEFAULT_STABLE_SLOPE,
            seasonality_periods: DEFAULT_PERIODS.to_vec(),
            seasonality_threshold: DEFAULT_THRESHOLD,
            anomaly_threshold: thresholds.threshold,
            medium_severity: thresholds.medium,
            high_severity: thresholds.high,
            max_histogram_bins: DEFAULT_MAX_BINS,
            quartile_method: QuartileMethod::default(),
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Write the config as pretty JSON
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha < 1.0) {
            return Err(InsightError::InvalidParameter(format!(
                "smoothingAlpha must be in (0, 1), got {}",
                self.smoothing_alpha
            )));
        }

        if !self.stable_slope_threshold.is_finite() || self.stable_slope_threshold < 0.0 {
            return Err(InsightError::InvalidParameter(format!(
                "stableSlopeThreshold must be a non-negative number, got {}",
                self.stable_slope_threshold
            )));
        }

        if let Some(period) = self.seasonality_periods.iter().find(|&&p| p < 2) {
            return Err(InsightError::InvalidParameter(format!(
                "seasonalityPeriods entries must be at least 2, got {}",
                period
            )));
        }

        if !(-1.0..=1.0).contains(&self.seasonality_threshold) {
            return Err(InsightError::InvalidParameter(format!(
                "seasonalityThreshold must be in [-1, 1], got {}",
                self.seasonality_threshold
            )));
        }

        self.anomaly_thresholds().validate()?;

        if self.max_histogram_bins == 0 {
            return Err(InsightError::InvalidParameter(
                "maxHistogramBins must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn with_forecast_horizon(mut self, horizon: usize) -> Self {
        self.forecast_horizon = horizon;
        self
    }

    pub fn with_smoothing_alpha(mut self, alpha: f64) -> Self {
        self.smoothing_alpha = alpha;
        self
    }

    pub fn with_stable_slope_threshold(mut self, threshold: f64) -> Self {
        self.stable_slope_threshold = threshold;
        self
    }

    pub fn with_seasonality_periods(mut self, periods: Vec<usize>) -> Self {
        self.seasonality_periods = periods;
        self
    }

    pub fn with_seasonality_threshold(mut self, threshold: f64) -> Self {
        self.seasonality_threshold = threshold;
        self
    }

    pub fn with_anomaly_thresholds(mut self, thresholds: AnomalyThresholds) -> Self {
        self.anomaly_threshold = thresholds.threshold;
        self.medium_severity = thresholds.medium;
        self.high_severity = thresholds.high;
        self
    }

    pub fn with_max_histogram_bins(mut self, bins: usize) -> Self {
        self.max_histogram_bins = bins;
        self
    }

    pub fn with_quartile_method(mut self, method: QuartileMethod) -> Self {
        self.quartile_method = method;
        self
    }

    pub fn with_cache_ttl_seconds(mut self, seconds: u64) -> Self {
        self.cache_ttl_seconds = seconds;
        self
    }

    pub fn seasonality_params(&self) -> SeasonalityParams {
        SeasonalityParams {
            candidate_periods: self.seasonality_periods.clone(),
            threshold: self.seasonality_threshold,
        }
    }

    pub fn trend_params(&self) -> TrendParams {
        TrendParams {
            stable_slope: self.stable_slope_threshold,
            seasonality: self.seasonality_params(),
        }
    }

    pub fn anomaly_thresholds(&self) -> AnomalyThresholds {
        AnomalyThresholds {
            threshold: self.anomaly_threshold,
            medium: self.medium_severity,
            high: self.high_severity,
        }
    }

    /// Cache lifetime as a chrono duration, saturating at `i64::MAX` seconds
    pub fn cache_ttl(&self) -> Duration {
        let seconds = i64::try_from(self.cache_ttl_seconds).unwrap_or(i64::MAX);
        Duration::try_seconds(seconds).unwrap_or(Duration::MAX)
    }
}
