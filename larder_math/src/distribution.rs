//! Histogram binning and shape classification
//!
//! The goodness-of-fit score is a heuristic computed from skewness and
//! kurtosis magnitudes. It is not the result of a statistical test.

use crate::descriptive::descriptive_stats;
use crate::{MathError, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Shortest series that is classified
pub const MIN_DISTRIBUTION_LENGTH: usize = 5;

/// Upper bound on the number of histogram bins
pub const DEFAULT_MAX_BINS: usize = 10;

/// Shape label derived from skewness and kurtosis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionShape {
    Normal,
    RightSkewed,
    LeftSkewed,
    HeavyTailed,
    LightTailed,
    #[default]
    InsufficientData,
}

impl std::fmt::Display for DistributionShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Normal => "normal",
            Self::RightSkewed => "right_skewed",
            Self::LeftSkewed => "left_skewed",
            Self::HeavyTailed => "heavy_tailed",
            Self::LightTailed => "light_tailed",
            Self::InsufficientData => "insufficient_data",
        };
        write!(f, "{}", label)
    }
}

/// Moments reported with the classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionParameters {
    pub mean: f64,
    pub std: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

/// One histogram bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    /// Bounds formatted with one decimal, e.g. `"1.0-2.5"`
    pub range: String,
    pub count: usize,
    /// Share of the series in this bin, in percent
    pub percentage: f64,
}

/// Result of distribution analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionResult {
    #[serde(rename = "type")]
    pub shape: DistributionShape,
    /// Serialized as `{}` when absent
    #[serde(
        default,
        serialize_with = "serialize_parameters",
        deserialize_with = "deserialize_parameters"
    )]
    pub parameters: Option<DistributionParameters>,
    pub goodness_of_fit: f64,
    pub histogram: Vec<HistogramBin>,
}

fn serialize_parameters<S: Serializer>(
    parameters: &Option<DistributionParameters>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match parameters {
        Some(parameters) => parameters.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

fn deserialize_parameters<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<DistributionParameters>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bag {
        Filled(DistributionParameters),
        Empty {},
    }

    Ok(match Option::<Bag>::deserialize(deserializer)? {
        Some(Bag::Filled(parameters)) => Some(parameters),
        Some(Bag::Empty {}) | None => None,
    })
}

/// Analyze the distribution with at most ten bins.
pub fn analyze_distribution(values: &[f64]) -> DistributionResult {
    analyze_distribution_with(values, DEFAULT_MAX_BINS)
}

/// Analyze the distribution with at most `max_bins` bins.
///
/// Series shorter than five points are labelled `insufficient_data` with no
/// parameters, a zero score and an empty histogram.
pub fn analyze_distribution_with(values: &[f64], max_bins: usize) -> DistributionResult {
    if values.len() < MIN_DISTRIBUTION_LENGTH {
        return DistributionResult::default();
    }

    let stats = descriptive_stats(values);
    let bins = bin_count(values.len(), max_bins);

    let shape = if stats.skewness.abs() > 1.0 {
        if stats.skewness > 0.0 {
            DistributionShape::RightSkewed
        } else {
            DistributionShape::LeftSkewed
        }
    } else if stats.kurtosis.abs() > 1.0 {
        if stats.kurtosis > 0.0 {
            DistributionShape::HeavyTailed
        } else {
            DistributionShape::LightTailed
        }
    } else {
        DistributionShape::Normal
    };

    let goodness_of_fit =
        (100.0 - stats.skewness.abs() * 20.0 - stats.kurtosis.abs() * 10.0).max(0.0);

    tracing::debug!(%shape, bins, goodness_of_fit, "distribution classified");

    DistributionResult {
        shape,
        parameters: Some(DistributionParameters {
            mean: stats.mean,
            std: stats.standard_deviation,
            skewness: stats.skewness,
            kurtosis: stats.kurtosis,
        }),
        goodness_of_fit,
        histogram: fill_bins(values, bins),
    }
}

/// `min(max_bins, ceil(sqrt(n)))`, at least one.
fn bin_count(n: usize, max_bins: usize) -> usize {
    let root = (n as f64).sqrt().ceil() as usize;
    root.min(max_bins).max(1)
}

/// Equal-width histogram over `[min, max]`.
///
/// Bins are half-open `[start, end)` except the last, which also holds the
/// maximum, so the counts always sum to `values.len()`. A constant series
/// lands entirely in the last bin.
pub fn histogram(values: &[f64], bins: usize) -> Result<Vec<HistogramBin>> {
    if bins == 0 {
        return Err(MathError::InvalidInput(
            "Histogram needs at least one bin".to_string(),
        ));
    }
    Ok(fill_bins(values, bins))
}

/// Histogram body; `bins` must be at least one.
fn fill_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &value in values {
        let slot = if width > 0.0 {
            (((value - min) / width).floor() as usize).min(bins - 1)
        } else {
            bins - 1
        };
        counts[slot] += 1;
    }

    let total = values.len() as f64;
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = min + i as f64 * width;
            let end = min + (i + 1) as f64 * width;
            HistogramBin {
                range: format!("{:.1}-{:.1}", start, end),
                count,
                percentage: count as f64 * 100.0 / total,
            }
        })
        .collect()
}
