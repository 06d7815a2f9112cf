//! Rule-based sales predictions
//!
//! Short-range projections and insight cards built on the regression and
//! smoothing routines of `larder_math`. Thresholds and confidence figures
//! are fixed heuristics, not fitted parameters.

use crate::error::Result;
use crate::intelligence::StockItem;
use crate::utils::future_dates;
use chrono::{Datelike, NaiveDate, Weekday};
use larder_math::forecasting::{forecast_exponential_smoothing, DEFAULT_ALPHA};
use larder_math::seasonality::seasonal_profile;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use larder_math::trend::linear_slope as linear_trend;

/// Days projected by [`predict_sales_pattern`] and [`project_demand`]
pub const PROJECTION_DAYS: usize = 30;

/// Shortest history accepted by [`predict_sales_pattern`]
pub const MIN_PATTERN_LENGTH: usize = 7;

/// Shortest history scanned by [`detect_sales_insights`]
pub const MIN_INSIGHT_LENGTH: usize = 14;

/// Shortest dated history used by [`analyze_weekly_pattern`]
pub const MIN_WEEKLY_LENGTH: usize = 30;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Trend,
    Seasonal,
    Anomaly,
    Forecast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// Stock coverage risk against projected demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub confidence: f64,
    pub timeframe: String,
    pub impact: Impact,
    pub action_required: bool,
    pub recommendations: Vec<String>,
}

/// One projected day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// ISO-8601 date
    pub period: String,
    pub predicted_value: f64,
    pub confidence: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPattern {
    pub peak_day: Weekday,
    /// Percent above the overall daily average, rounded
    pub increase: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandProjection {
    pub demand: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockPlan {
    pub product: String,
    pub current_stock: f64,
    pub predicted_demand: f64,
    pub recommended_order: f64,
    pub confidence: f64,
    pub risk_level: RiskLevel,
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Per-phase average minus the overall average
pub fn seasonal_factors(values: &[f64], period: usize) -> Vec<f64> {
    let overall = average(values);
    seasonal_profile(values, period)
        .into_iter()
        .map(|phase| phase - overall)
        .collect()
}

/// Project the next 30 days after `last_day`.
///
/// Each point is the last observed value plus the regression drift and the
/// weekly factor for that offset, floored at zero. Confidence decays by 0.8
/// points a day down to 60. Histories under a week yield no points.
pub fn predict_sales_pattern(values: &[f64], last_day: NaiveDate) -> Result<Vec<ForecastPoint>> {
    if values.len() < MIN_PATTERN_LENGTH {
        return Ok(Vec::new());
    }

    let trend = linear_trend(values);
    let factors = seasonal_factors(values, MIN_PATTERN_LENGTH.min(values.len()));
    let last = values[values.len() - 1];

    let points = future_dates(last_day, PROJECTION_DAYS)?
        .into_iter()
        .enumerate()
        .map(|(offset, date)| {
            let step = offset + 1;
            let seasonal = factors[step % factors.len()];
            let predicted = (last + trend * step as f64 + seasonal).max(0.0);
            let spread = predicted * 0.15;

            ForecastPoint {
                period: date.format("%Y-%m-%d").to_string(),
                predicted_value: predicted.round(),
                confidence: (95.0 - step as f64 * 0.8).max(60.0),
                lower_bound: (predicted - spread).round(),
                upper_bound: (predicted + spread).round(),
            }
        })
        .collect();

    Ok(points)
}

/// Outlier and decline insights over a recent sales history
pub fn detect_sales_insights(values: &[f64]) -> Vec<PredictiveInsight> {
    let mut insights = Vec::new();
    if values.len() < MIN_INSIGHT_LENGTH {
        return insights;
    }

    let mean = average(values);
    let std = larder_math::descriptive::population_variance(values, mean).sqrt();

    let outliers = values
        .iter()
        .filter(|&&v| (v - mean).abs() > 2.0 * std)
        .count();

    if outliers > 0 {
        insights.push(PredictiveInsight {
            kind: InsightKind::Anomaly,
            title: "Anomalies detected".to_string(),
            description: format!(
                "{} data points deviate significantly from the normal pattern",
                outliers
            ),
            confidence: 85.0,
            timeframe: "Last 14 days".to_string(),
            impact: Impact::High,
            action_required: true,
            recommendations: vec![
                "Investigate the causes of abnormal peaks or drops".to_string(),
                "Check the point of sale for recording problems".to_string(),
                "Review marketing campaigns that could explain the peaks".to_string(),
            ],
        });
    }

    let recent = &values[values.len() - 7..];
    if linear_trend(recent) < -mean * 0.05 {
        insights.push(PredictiveInsight {
            kind: InsightKind::Trend,
            title: "Declining trend detected".to_string(),
            description: "Sales have been declining over the last 7 days".to_string(),
            confidence: 78.0,
            timeframe: "Next 7-14 days".to_string(),
            impact: Impact::Medium,
            action_required: true,
            recommendations: vec![
                "Introduce customer retention measures".to_string(),
                "Review prices against competitors".to_string(),
                "Step up marketing efforts".to_string(),
            ],
        });
    }

    debug!(len = values.len(), insights = insights.len(), "sales insights scanned");
    insights
}

/// Weekday with the highest average sales.
///
/// Needs at least 30 dated points. Returns `None` when no weekday has a
/// positive average.
pub fn analyze_weekly_pattern(points: &[(NaiveDate, f64)]) -> Option<WeeklyPattern> {
    if points.len() < MIN_WEEKLY_LENGTH {
        return None;
    }

    let mut totals = [0.0_f64; 7];
    let mut counts = [0_usize; 7];
    for (date, value) in points {
        let slot = date.weekday().num_days_from_monday() as usize;
        totals[slot] += value;
        counts[slot] += 1;
    }

    let mut peak: Option<(Weekday, f64)> = None;
    for (slot, weekday) in WEEKDAYS.iter().enumerate() {
        if counts[slot] == 0 {
            continue;
        }
        let day_average = totals[slot] / counts[slot] as f64;
        let best = peak.map_or(0.0, |(_, avg)| avg);
        if day_average > best {
            peak = Some((*weekday, day_average));
        }
    }

    let (peak_day, peak_average) = peak?;
    let overall = points.iter().map(|(_, v)| v).sum::<f64>() / points.len() as f64;
    let increase = if overall > 0.0 {
        ((peak_average - overall) / overall * 100.0).round()
    } else {
        0.0
    };

    Some(WeeklyPattern {
        peak_day,
        increase,
        confidence: (60.0 + points.len() as f64 / 30.0 * 10.0).min(95.0),
    })
}

/// Insight card for the weekly peak, if one exists
pub fn analyze_seasonal_patterns(points: &[(NaiveDate, f64)]) -> Vec<PredictiveInsight> {
    analyze_weekly_pattern(points)
        .map(|pattern| PredictiveInsight {
            kind: InsightKind::Seasonal,
            title: format!("Weekly peak: {}", pattern.peak_day),
            description: format!(
                "{} consistently sells {}% more than the average day",
                pattern.peak_day, pattern.increase
            ),
            confidence: pattern.confidence,
            timeframe: "Weekly pattern".to_string(),
            impact: Impact::Medium,
            action_required: false,
            recommendations: vec![
                format!("Build up stock ahead of {}", pattern.peak_day),
                "Plan promotions for low-performing days".to_string(),
                "Adjust opening hours to the weekly pattern".to_string(),
            ],
        })
        .into_iter()
        .collect()
}

/// Demand over the next 30 days from a daily demand history.
///
/// Demand is the mean plus 30 days of regression drift, rounded and at
/// least 1. Confidence is the smoothing forecaster's fit confidence.
pub fn project_demand(history: &[f64]) -> Result<DemandProjection> {
    let drift = linear_trend(history) * PROJECTION_DAYS as f64;
    let demand = (average(history) + drift).round().max(1.0);
    let fit = forecast_exponential_smoothing(history, 1, DEFAULT_ALPHA)?;

    Ok(DemandProjection {
        demand,
        confidence: fit.confidence,
    })
}

/// Classify stock coverage: below 30% of demand is high risk, below 70%
/// medium.
pub fn stock_risk_level(current_stock: f64, predicted_demand: f64) -> RiskLevel {
    if predicted_demand <= 0.0 {
        return RiskLevel::Low;
    }

    let ratio = current_stock / predicted_demand;
    if ratio < 0.3 {
        RiskLevel::High
    } else if ratio < 0.7 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Projected demand, suggested order and risk for one product
pub fn plan_restock(item: &StockItem, history: &[f64]) -> Result<RestockPlan> {
    let projection = project_demand(history)?;

    Ok(RestockPlan {
        product: item.name.clone(),
        current_stock: item.current_stock,
        predicted_demand: projection.demand,
        recommended_order: (projection.demand - item.current_stock).max(0.0),
        confidence: projection.confidence,
        risk_level: stock_risk_level(item.current_stock, projection.demand),
    })
}

/// Compare the normalised revenue trend with an assumed cost trend.
///
/// Cost trend is 5% when the stock is worth more than 50 000, else 2%.
pub fn profitability_outlook(sales: &[f64], stock_total_value: f64) -> Option<PredictiveInsight> {
    let mean = average(sales);
    let revenue_trend = if mean == 0.0 {
        0.0
    } else {
        linear_trend(sales) / mean
    };
    let cost_trend = if stock_total_value > 50_000.0 { 0.05 } else { 0.02 };
    let outlook = revenue_trend - cost_trend;

    if outlook > 0.1 {
        Some(PredictiveInsight {
            kind: InsightKind::Forecast,
            title: "Profitability growth expected".to_string(),
            description: format!(
                "Profitability projected to rise {:.1}% over the next 30 days",
                outlook * 100.0
            ),
            confidence: 73.0,
            timeframe: "30 days".to_string(),
            impact: Impact::High,
            action_required: false,
            recommendations: vec![
                "Use the momentum to expand stock".to_string(),
                "Consider investing in marketing".to_string(),
                "Favour high-margin products in the mix".to_string(),
            ],
        })
    } else if outlook < -0.05 {
        Some(PredictiveInsight {
            kind: InsightKind::Forecast,
            title: "Profitability decline alert".to_string(),
            description: format!(
                "Profitability projected to fall {:.1}%",
                outlook.abs() * 100.0
            ),
            confidence: 68.0,
            timeframe: "30 days".to_string(),
            impact: Impact::High,
            action_required: true,
            recommendations: vec![
                "Review product prices and margins".to_string(),
                "Reduce operating costs".to_string(),
                "Focus on high-margin products".to_string(),
                "Renegotiate with suppliers".to_string(),
            ],
        })
    } else {
        None
    }
}
