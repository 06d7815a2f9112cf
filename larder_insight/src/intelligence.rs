//! Business KPIs derived from a sales series and a stock listing

use crate::error::{InsightError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum stock assumed when an item does not declare one
pub const DEFAULT_MIN_STOCK: f64 = 10.0;

/// Revenue growth target, percent
pub const GROWTH_TARGET: f64 = 15.0;

/// Estimated order cycle in days
pub const CYCLE_TIME_DAYS: f64 = 7.0;

/// Sliding window used for best/worst period detection
const WINDOW_DAYS: usize = 7;

const INDUSTRY_AVERAGE_GROWTH: f64 = 8.5;
const INDUSTRY_TOP_QUARTILE: f64 = 15.2;
const INDUSTRY_MEDIAN: f64 = 6.8;

/// One stocked product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub name: String,
    pub current_stock: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<f64>,
}

impl StockItem {
    pub fn new(name: impl Into<String>, current_stock: f64) -> Self {
        Self {
            name: name.into(),
            current_stock,
            min_stock: None,
        }
    }

    pub fn with_min_stock(mut self, min_stock: f64) -> Self {
        self.min_stock = Some(min_stock);
        self
    }

    /// At or below the minimum stock level
    pub fn is_low(&self) -> bool {
        self.current_stock <= self.min_stock.unwrap_or(DEFAULT_MIN_STOCK)
    }
}

/// Operational quality measurements, all percentages
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySnapshot {
    pub accuracy_rate: f64,
    pub error_rate: f64,
    pub customer_satisfaction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueKpis {
    pub current: f64,
    /// Percent growth of the whole period over its first half
    pub growth: f64,
    pub target: f64,
    /// Growth as a percentage of the growth target, capped at 100
    pub achievement: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyKpis {
    pub inventory_turnover: f64,
    pub stockout_rate: f64,
    pub fill_rate: f64,
    pub cycle_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub revenue: RevenueKpis,
    pub efficiency: EfficiencyKpis,
    pub quality: QualitySnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryBenchmarks {
    pub average_growth: f64,
    pub top_quartile_performance: f64,
    pub median_performance: f64,
}

impl Default for IndustryBenchmarks {
    fn default() -> Self {
        Self {
            average_growth: INDUSTRY_AVERAGE_GROWTH,
            top_quartile_performance: INDUSTRY_TOP_QUARTILE,
            median_performance: INDUSTRY_MEDIAN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalBenchmarks {
    pub best_period: String,
    pub worst_period: String,
    pub average_performance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmarks {
    pub industry: IndustryBenchmarks,
    pub internal: InternalBenchmarks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sales,
    Inventory,
    Quality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: Category,
    pub action: String,
    /// Expected impact score, 0-100
    pub impact: f64,
    /// Expected effort score, 0-100
    pub effort: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessIntelligence {
    pub kpis: Kpis,
    pub benchmarks: Benchmarks,
    pub recommendations: Vec<Recommendation>,
}

/// Compute KPIs, benchmarks and recommendations.
///
/// `sales` is a per-day revenue series. Fails on non-finite sales, stock or
/// quality figures.
pub fn generate_business_intelligence(
    sales: &[f64],
    stock: &[StockItem],
    quality: QualitySnapshot,
) -> Result<BusinessIntelligence> {
    validate_inputs(sales, stock, &quality)?;

    let kpis = Kpis {
        revenue: revenue_kpis(sales),
        efficiency: efficiency_kpis(sales, stock),
        quality,
    };

    let benchmarks = Benchmarks {
        industry: IndustryBenchmarks::default(),
        internal: InternalBenchmarks {
            best_period: best_window_label(sales),
            worst_period: worst_window_label(sales),
            average_performance: if sales.is_empty() {
                0.0
            } else {
                sales.iter().sum::<f64>() / sales.len() as f64
            },
        },
    };

    let recommendations = recommendations(&kpis, &benchmarks);

    debug!(
        growth = kpis.revenue.growth,
        stockout_rate = kpis.efficiency.stockout_rate,
        recommendations = recommendations.len(),
        "business intelligence generated"
    );

    Ok(BusinessIntelligence {
        kpis,
        benchmarks,
        recommendations,
    })
}

fn validate_inputs(sales: &[f64], stock: &[StockItem], quality: &QualitySnapshot) -> Result<()> {
    larder_math::validate_finite(sales)
        .map_err(|e| InsightError::ValidationError(format!("sales: {}", e)))?;

    for item in stock {
        let min_ok = item.min_stock.map_or(true, f64::is_finite);
        if !item.current_stock.is_finite() || !min_ok {
            return Err(InsightError::ValidationError(format!(
                "stock item {:?} has a non-finite level",
                item.name
            )));
        }
    }

    let rates = [
        quality.accuracy_rate,
        quality.error_rate,
        quality.customer_satisfaction,
    ];
    if rates.iter().any(|r| !r.is_finite()) {
        return Err(InsightError::ValidationError(
            "quality snapshot contains a non-finite rate".to_string(),
        ));
    }

    Ok(())
}

fn revenue_kpis(sales: &[f64]) -> RevenueKpis {
    let current: f64 = sales.iter().sum();
    let previous: f64 = sales[..sales.len() / 2].iter().sum();
    let growth = if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    };

    RevenueKpis {
        current,
        growth,
        target: current * (1.0 + GROWTH_TARGET / 100.0),
        achievement: (growth / GROWTH_TARGET * 100.0).min(100.0),
    }
}

fn efficiency_kpis(sales: &[f64], stock: &[StockItem]) -> EfficiencyKpis {
    let current: f64 = sales.iter().sum();
    let products = stock.len() as f64;
    let low = stock.iter().filter(|item| item.is_low()).count() as f64;

    if stock.is_empty() {
        return EfficiencyKpis {
            inventory_turnover: 0.0,
            stockout_rate: 0.0,
            fill_rate: 0.0,
            cycle_time: CYCLE_TIME_DAYS,
        };
    }

    EfficiencyKpis {
        inventory_turnover: if sales.is_empty() {
            0.0
        } else {
            current / (products * 100.0) * 4.0
        },
        stockout_rate: low / products * 100.0,
        fill_rate: (products - low) / products * 100.0,
        cycle_time: CYCLE_TIME_DAYS,
    }
}

fn window_sums(sales: &[f64]) -> impl Iterator<Item = (usize, f64)> + '_ {
    sales
        .windows(WINDOW_DAYS)
        .map(|window| window.iter().sum::<f64>())
        .enumerate()
}

fn window_label(start: Option<usize>) -> String {
    match start {
        Some(index) => format!("Week starting on day {}", index + 1),
        None => "insufficient data".to_string(),
    }
}

/// First 7-day window with the largest total
pub fn best_window_label(sales: &[f64]) -> String {
    let best = window_sums(sales)
        .fold(None, |best: Option<(usize, f64)>, (i, sum)| match best {
            Some((_, top)) if sum <= top => best,
            _ => Some((i, sum)),
        })
        .map(|(i, _)| i);
    window_label(best)
}

/// First 7-day window with the smallest total
pub fn worst_window_label(sales: &[f64]) -> String {
    let worst = window_sums(sales)
        .fold(None, |worst: Option<(usize, f64)>, (i, sum)| match worst {
            Some((_, bottom)) if sum >= bottom => worst,
            _ => Some((i, sum)),
        })
        .map(|(i, _)| i);
    window_label(worst)
}

fn recommendations(kpis: &Kpis, benchmarks: &Benchmarks) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if kpis.revenue.growth < benchmarks.industry.average_growth {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: Category::Sales,
            action: "Implement sales growth strategies".to_string(),
            impact: 85.0,
            effort: 70.0,
            roi: 1.5,
        });
    }

    if kpis.efficiency.stockout_rate > 10.0 {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: Category::Inventory,
            action: "Rebalance stock levels to reduce stockouts".to_string(),
            impact: 80.0,
            effort: 60.0,
            roi: 2.0,
        });
    }

    if kpis.quality.accuracy_rate < 90.0 {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            category: Category::Quality,
            action: "Tighten quality controls".to_string(),
            impact: 70.0,
            effort: 50.0,
            roi: 1.8,
        });
    }

    recommendations
}
