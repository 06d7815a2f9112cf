//! Descriptive statistics over a numeric series
//!
//! Moments use the population form (divide by `n`). A constant series is
//! detected by exact equality and reported with its value as mean, median and
//! mode and every spread and shape measure at 0.

use crate::{mean, sorted_copy};
use serde::{Deserialize, Serialize};

/// How the interquartile range picks its quartiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuartileMethod {
    /// Q1 at index `floor(0.25 * n)`, Q3 at `floor(0.75 * n)` of the sorted copy
    #[default]
    NearestRank,
    /// Linear interpolation between the closest ranks (`p * (n - 1)`)
    Linear,
}

/// Summary statistics derived from a series
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveStats {
    pub mean: f64,
    pub median: f64,
    /// Most frequent value; ties resolve to the smallest value
    pub mode: f64,
    pub standard_deviation: f64,
    /// Population variance
    pub variance: f64,
    pub skewness: f64,
    /// Excess kurtosis (fourth standardized moment minus 3)
    pub kurtosis: f64,
    pub range: f64,
    pub interquartile_range: f64,
}

/// Compute descriptive statistics with nearest-rank quartiles.
///
/// Returns the all-zero record for an empty series.
pub fn descriptive_stats(values: &[f64]) -> DescriptiveStats {
    descriptive_stats_with(values, QuartileMethod::NearestRank)
}

/// Compute descriptive statistics with the given quartile method.
pub fn descriptive_stats_with(values: &[f64], quartiles: QuartileMethod) -> DescriptiveStats {
    if values.is_empty() {
        return DescriptiveStats::default();
    }

    let sorted = sorted_copy(values);
    let n = sorted.len();

    if sorted[0] == sorted[n - 1] {
        return DescriptiveStats {
            mean: sorted[0],
            median: sorted[0],
            mode: sorted[0],
            ..DescriptiveStats::default()
        };
    }

    let mean = mean(values);
    let variance = population_variance(values, mean);
    let standard_deviation = variance.sqrt();
    let (skewness, kurtosis) = shape_moments(values, mean, standard_deviation);

    let interquartile_range = match quartiles {
        QuartileMethod::NearestRank => {
            // floor(0.75 * n) < n for every n >= 1
            sorted[n * 3 / 4] - sorted[n / 4]
        }
        QuartileMethod::Linear => {
            interpolated_quantile(&sorted, 0.75) - interpolated_quantile(&sorted, 0.25)
        }
    };

    DescriptiveStats {
        mean,
        median: median_of_sorted(&sorted),
        mode: mode_of_sorted(&sorted),
        standard_deviation,
        variance,
        skewness,
        kurtosis,
        range: sorted[n - 1] - sorted[0],
        interquartile_range,
    }
}

/// Population variance around a precomputed mean.
pub fn population_variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Third and fourth standardized moments (the latter as excess kurtosis).
fn shape_moments(values: &[f64], mean: f64, std_dev: f64) -> (f64, f64) {
    if std_dev == 0.0 {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let (m3, m4) = values.iter().fold((0.0, 0.0), |(m3, m4), &x| {
        let z = (x - mean) / std_dev;
        (m3 + z.powi(3), m4 + z.powi(4))
    });

    (m3 / n, m4 / n - 3.0)
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Longest run in the sorted copy. Runs are visited in ascending order and
/// only a strictly longer run replaces the current best.
fn mode_of_sorted(sorted: &[f64]) -> f64 {
    let mut best_value = sorted[0];
    let mut best_count = 0;

    let mut start = 0;
    while start < sorted.len() {
        let mut end = start + 1;
        while end < sorted.len() && sorted[end] == sorted[start] {
            end += 1;
        }

        if end - start > best_count {
            best_count = end - start;
            best_value = sorted[start];
        }
        start = end;
    }

    best_value
}

fn interpolated_quantile(sorted: &[f64], p: f64) -> f64 {
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
