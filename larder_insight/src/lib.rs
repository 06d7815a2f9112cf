//! # Larder Insight
//!
//! Statistical reports and business indicators for restaurant sales and
//! inventory series.
//!
//! ## Features
//!
//! - Validated series with optional ISO-8601 date labels
//! - Full statistical report (descriptive stats, trend, seasonality,
//!   forecast, anomalies, distribution) with JSON output
//! - Configurable thresholds loaded from JSON
//! - Caller-owned TTL cache with an injectable clock
//! - Business KPIs and rule-based sales predictions
//! - `tracing` based logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use larder_insight::{AnalysisConfig, Analyzer, Series};
//!
//! let series = Series::new(vec![12.0, 15.0, 14.0, 18.0, 21.0, 19.0, 24.0])?;
//! let analyzer = Analyzer::new(AnalysisConfig::default())?;
//!
//! let report = analyzer.full_analysis(&series)?;
//! assert_eq!(report.forecasting.next_period.len(), 7);
//! println!("{}", report.to_json_pretty()?);
//! # Ok::<(), larder_insight::InsightError>(())
//! ```

pub mod analysis;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod intelligence;
pub mod logging;
pub mod predictive;
pub mod series;
pub mod utils;

// Re-export commonly used types
pub use crate::analysis::{AnomalyPoint, AnomalyReport, Analyzer, StatisticalAnalysis};
pub use crate::cache::TtlCache;
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::AnalysisConfig;
pub use crate::error::{InsightError, Result};
pub use crate::intelligence::{generate_business_intelligence, BusinessIntelligence, StockItem};
pub use crate::series::Series;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
