//! Autocorrelation-based seasonality detection

use crate::{is_constant, mean};
use serde::{Deserialize, Serialize};

/// Candidate periods tried by default (weekly, monthly, daily-hours, 30-day)
pub const DEFAULT_PERIODS: [usize; 4] = [7, 12, 24, 30];

/// Autocorrelation a period must exceed to count as seasonal
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Shortest series on which detection is attempted
pub const MIN_SEASONALITY_LENGTH: usize = 12;

/// Outcome of seasonality detection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalityResult {
    pub has_seasonality: bool,
    /// Best candidate period, 0 when no candidate had positive autocorrelation
    pub period: usize,
    /// Range of the per-phase averages; 0 unless seasonality was detected
    pub amplitude: f64,
}

/// Detection parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalityParams {
    pub candidate_periods: Vec<usize>,
    pub threshold: f64,
}

impl Default for SeasonalityParams {
    fn default() -> Self {
        Self {
            candidate_periods: DEFAULT_PERIODS.to_vec(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Detect seasonality with the default candidate periods and threshold.
pub fn detect_seasonality(values: &[f64]) -> SeasonalityResult {
    detect_seasonality_with(values, &SeasonalityParams::default())
}

/// Detect seasonality with explicit parameters.
///
/// Candidates at or above half the series length are skipped. The first
/// candidate with the highest strictly positive autocorrelation wins.
pub fn detect_seasonality_with(values: &[f64], params: &SeasonalityParams) -> SeasonalityResult {
    if values.len() < MIN_SEASONALITY_LENGTH {
        return SeasonalityResult::default();
    }

    let half = values.len() as f64 / 2.0;
    let mut best_period = 0;
    let mut max_autocorr = 0.0;

    for &period in params
        .candidate_periods
        .iter()
        .filter(|&&p| p > 0 && (p as f64) < half)
    {
        let autocorr = autocorrelation(values, period);
        if autocorr > max_autocorr {
            max_autocorr = autocorr;
            best_period = period;
        }
    }

    let has_seasonality = max_autocorr > params.threshold;
    let amplitude = if has_seasonality {
        seasonal_amplitude(values, best_period)
    } else {
        0.0
    };

    tracing::debug!(
        period = best_period,
        autocorrelation = max_autocorr,
        has_seasonality,
        "seasonality scan complete"
    );

    SeasonalityResult {
        has_seasonality,
        period: best_period,
        amplitude,
    }
}

/// Normalized autocorrelation at `lag`.
///
/// The numerator sums over the overlapping pairs, the denominator over the
/// whole series. Returns 0 when the lag does not fit or the series is
/// constant.
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    if values.len() <= lag || is_constant(values) {
        return 0.0;
    }

    let mean = mean(values);
    let numerator: f64 = values
        .iter()
        .zip(values[lag..].iter())
        .map(|(&a, &b)| (a - mean) * (b - mean))
        .sum();
    let denominator: f64 = values.iter().map(|&x| (x - mean).powi(2)).sum();

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Average of the values sharing each phase `index % period`.
pub fn seasonal_profile(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return Vec::new();
    }

    (0..period.min(values.len()))
        .map(|phase| {
            let phase_values: Vec<f64> = values.iter().skip(phase).step_by(period).copied().collect();
            mean(&phase_values)
        })
        .collect()
}

/// Max minus min of the seasonal profile; 0 unless two full periods exist.
pub fn seasonal_amplitude(values: &[f64], period: usize) -> f64 {
    if period == 0 || values.len() < period * 2 {
        return 0.0;
    }

    let profile = seasonal_profile(values, period);
    let max = profile.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = profile.iter().cloned().fold(f64::INFINITY, f64::min);
    max - min
}
