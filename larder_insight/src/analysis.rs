//! Series analysis entry points
//!
//! [`Analyzer`] binds an [`AnalysisConfig`] and a [`Clock`] to the numeric
//! routines in `larder_math` and assembles their results into a
//! [`StatisticalAnalysis`] report.

use crate::cache::{fingerprint, TtlCache};
use crate::clock::{Clock, SystemClock};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::series::Series;
use crate::utils::backdated_label;
use larder_math::anomaly::{scan_outliers_with, Severity};
use larder_math::descriptive::{descriptive_stats_with, DescriptiveStats};
use larder_math::distribution::{analyze_distribution_with, DistributionResult};
use larder_math::forecasting::{forecast_exponential_smoothing, ForecastResult};
use larder_math::trend::{analyze_trend_with, TrendResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One flagged point of an anomaly report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyPoint {
    /// Supplied label, or a synthesized RFC 3339 instant
    pub date: String,
    pub value: f64,
    pub severity: Severity,
    /// Absolute z-score
    #[serde(rename = "zscore")]
    pub z_score: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub detected: bool,
    pub points: Vec<AnomalyPoint>,
}

/// Aggregate of every component's result for one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalAnalysis {
    pub descriptive_stats: DescriptiveStats,
    pub trends: TrendResult,
    pub forecasting: ForecastResult,
    pub anomalies: AnomalyReport,
    pub distribution: DistributionResult,
}

impl StatisticalAnalysis {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the statistical components with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Analyzer<C: Clock = SystemClock> {
    config: AnalysisConfig,
    clock: C,
}

impl Analyzer<SystemClock> {
    /// Analyzer on wall-clock time. Fails if `config` does not validate.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Analyzer<C> {
    /// Analyzer with an explicit time source for synthesized anomaly dates
    pub fn with_clock(config: AnalysisConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn descriptive_stats(&self, series: &Series) -> DescriptiveStats {
        descriptive_stats_with(series.values(), self.config.quartile_method)
    }

    /// Regression trend plus seasonality. Labels do not affect the result;
    /// the index is the time axis.
    pub fn analyze_trend(&self, series: &Series) -> TrendResult {
        analyze_trend_with(series.values(), &self.config.trend_params())
    }

    /// Forecast with the configured horizon and smoothing factor
    pub fn forecast(&self, series: &Series) -> Result<ForecastResult> {
        self.forecast_with(series, self.config.forecast_horizon, self.config.smoothing_alpha)
    }

    pub fn forecast_with(
        &self,
        series: &Series,
        horizon: usize,
        alpha: f64,
    ) -> Result<ForecastResult> {
        Ok(forecast_exponential_smoothing(series.values(), horizon, alpha)?)
    }

    /// Z-score anomalies, dated by label or backdated from the clock
    pub fn detect_anomalies(&self, series: &Series) -> AnomalyReport {
        let outliers = scan_outliers_with(series.values(), &self.config.anomaly_thresholds());
        if outliers.is_empty() {
            return AnomalyReport::default();
        }

        let now = self.clock.now();
        let n = series.len();
        let points: Vec<AnomalyPoint> = outliers
            .into_iter()
            .map(|outlier| AnomalyPoint {
                date: series
                    .label(outlier.index)
                    .map(str::to_string)
                    .unwrap_or_else(|| backdated_label(now, n - outlier.index)),
                value: outlier.value,
                severity: outlier.severity,
                z_score: outlier.z_score,
            })
            .collect();

        debug!(count = points.len(), "anomalies dated");

        AnomalyReport {
            detected: true,
            points,
        }
    }

    pub fn analyze_distribution(&self, series: &Series) -> DistributionResult {
        analyze_distribution_with(series.values(), self.config.max_histogram_bins)
    }

    /// Run every component and assemble the report
    pub fn full_analysis(&self, series: &Series) -> Result<StatisticalAnalysis> {
        let analysis = StatisticalAnalysis {
            descriptive_stats: self.descriptive_stats(series),
            trends: self.analyze_trend(series),
            forecasting: self.forecast(series)?,
            anomalies: self.detect_anomalies(series),
            distribution: self.analyze_distribution(series),
        };

        info!(
            len = series.len(),
            trend = %analysis.trends.trend_direction,
            anomalies = analysis.anomalies.points.len(),
            distribution = %analysis.distribution.shape,
            "full analysis complete"
        );

        Ok(analysis)
    }

    /// [`full_analysis`](Self::full_analysis) through a caller-owned cache.
    ///
    /// The key covers the configuration and the whole series, so analyzers
    /// with different settings can share one cache.
    pub fn full_analysis_cached<K: Clock>(
        &self,
        cache: &mut TtlCache<String, StatisticalAnalysis, K>,
        series: &Series,
    ) -> Result<StatisticalAnalysis> {
        let key = fingerprint("analysis", &(&self.config, series))?;

        if let Some(hit) = cache.get(&key) {
            info!(len = series.len(), "analysis cache hit");
            return Ok(hit.clone());
        }

        info!(len = series.len(), "analysis cache miss");
        let analysis = self.full_analysis(series)?;
        cache.set(key, analysis.clone());
        Ok(analysis)
    }
}
