//! Validated input series

use crate::error::{InsightError, Result};
use crate::utils::parse_date_label;
use chrono::NaiveDate;
use serde::Serialize;

/// An ordered numeric series with optional date labels
///
/// Construction rejects non-finite values, and labels whose count differs
/// from the value count or that are not ISO-8601 dates. Once built the
/// series is immutable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<String>>,
}

impl Series {
    /// Create an unlabelled series
    pub fn new(values: Vec<f64>) -> Result<Self> {
        larder_math::validate_finite(&values)
            .map_err(|e| InsightError::ValidationError(e.to_string()))?;

        Ok(Self {
            values,
            labels: None,
        })
    }

    /// Create a series with one date label per value
    pub fn with_labels(values: Vec<f64>, labels: Vec<String>) -> Result<Self> {
        if values.len() != labels.len() {
            return Err(InsightError::ValidationError(format!(
                "Values length ({}) doesn't match labels length ({})",
                values.len(),
                labels.len()
            )));
        }

        for (index, label) in labels.iter().enumerate() {
            parse_date_label(label).map_err(|e| {
                InsightError::ValidationError(format!(
                    "Label {:?} at index {} is not an ISO-8601 date: {}",
                    label, index, e
                ))
            })?;
        }

        let mut series = Self::new(values)?;
        series.labels = Some(labels);
        Ok(series)
    }

    /// Build a labelled series from dated observations
    pub fn from_dated(points: &[(NaiveDate, f64)]) -> Result<Self> {
        let (dates, values): (Vec<NaiveDate>, Vec<f64>) = points.iter().copied().unzip();
        let labels = dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
        Self::with_labels(values, labels)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Label at `index`, if labels were supplied
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.as_ref()?.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<Vec<f64>> for Series {
    type Error = InsightError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}
