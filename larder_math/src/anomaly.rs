//! Z-score outlier scanning

use crate::descriptive::descriptive_stats;
use crate::{is_constant, MathError, Result};
use serde::{Deserialize, Serialize};

/// Shortest series that is scanned
pub const MIN_ANOMALY_LENGTH: usize = 10;

/// How far a point lies from the mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Z-score breakpoints, all exclusive lower bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyThresholds {
    /// Points above this are anomalies
    pub threshold: f64,
    /// Anomalies above this are at least medium
    pub medium: f64,
    /// Anomalies above this are high
    pub high: f64,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            threshold: 2.5,
            medium: 3.0,
            high: 4.0,
        }
    }
}

impl AnomalyThresholds {
    /// Create thresholds, requiring `0 <= threshold < medium < high`
    pub fn new(threshold: f64, medium: f64, high: f64) -> Result<Self> {
        let thresholds = Self {
            threshold,
            medium,
            high,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check the ordering of the breakpoints
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold >= 0.0 && self.threshold < self.medium && self.medium < self.high) {
            return Err(MathError::InvalidInput(format!(
                "Anomaly thresholds must satisfy 0 <= {} < {} < {}",
                self.threshold, self.medium, self.high
            )));
        }
        Ok(())
    }

    /// Severity of an anomalous z-score
    pub fn severity(&self, z_score: f64) -> Severity {
        if z_score > self.high {
            Severity::High
        } else if z_score > self.medium {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

/// A point whose z-score exceeded the threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outlier {
    /// Position in the series
    pub index: usize,
    pub value: f64,
    /// Absolute z-score
    pub z_score: f64,
    pub severity: Severity,
}

/// Scan with the default thresholds.
pub fn scan_outliers(values: &[f64]) -> Vec<Outlier> {
    scan_outliers_with(values, &AnomalyThresholds::default())
}

/// Return every point whose absolute z-score exceeds `thresholds.threshold`,
/// in series order.
///
/// Series shorter than ten points and constant series yield no outliers.
pub fn scan_outliers_with(values: &[f64], thresholds: &AnomalyThresholds) -> Vec<Outlier> {
    if values.len() < MIN_ANOMALY_LENGTH {
        return Vec::new();
    }

    if is_constant(values) {
        tracing::warn!(len = values.len(), "zero variance, anomaly scan skipped");
        return Vec::new();
    }

    let stats = descriptive_stats(values);
    let outliers: Vec<Outlier> = values
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| {
            let z_score = ((value - stats.mean) / stats.standard_deviation).abs();
            (z_score > thresholds.threshold).then(|| Outlier {
                index,
                value,
                z_score,
                severity: thresholds.severity(z_score),
            })
        })
        .collect();

    tracing::debug!(count = outliers.len(), "anomaly scan complete");
    outliers
}
