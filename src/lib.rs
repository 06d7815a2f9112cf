//! # Larder
//!
//! `larder` bundles the Larder analytics crates behind cargo features:
//!
//! - `math` re-exports [`larder_math`] as [`math`]: descriptive statistics,
//!   trend, seasonality, forecasting, anomaly and distribution routines.
//! - `insight` re-exports [`larder_insight`] as [`insight`]: validated
//!   series, the analyzer and its JSON report, configuration, caching and
//!   business indicators.
//!
//! Both are enabled by default.
//!
//! ## Example
//!
//! ```
//! use larder::prelude::*;
//!
//! let series = Series::new(vec![3.0, 5.0, 4.0, 6.0, 8.0, 7.0])?;
//! let analyzer = Analyzer::new(AnalysisConfig::default())?;
//!
//! let trend = analyzer.analyze_trend(&series);
//! assert_eq!(trend.trend_direction, TrendDirection::Growth);
//! # Ok::<(), InsightError>(())
//! ```

#[cfg(feature = "math")]
pub use larder_math as math;

#[cfg(feature = "insight")]
pub use larder_insight as insight;

/// Commonly used types from every enabled crate.
pub mod prelude {
    #[cfg(feature = "math")]
    pub use larder_math::{
        anomaly::Severity, descriptive::DescriptiveStats, distribution::DistributionShape,
        forecasting::ForecastMethod, trend::TrendDirection, MathError,
    };

    #[cfg(feature = "insight")]
    pub use larder_insight::{
        AnalysisConfig, Analyzer, AnomalyReport, InsightError, Series, StatisticalAnalysis,
        TtlCache,
    };
}

/// Version of the facade crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
