//! Logging setup for applications embedding larder.
//!
//! The library only emits `tracing` events; nothing is printed unless the
//! host installs a subscriber. [`init_logging`] installs one with an
//! `EnvFilter` and a plain or JSON `fmt` layer.

use crate::error::{InsightError, Result};
use tracing::Level;

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level for everything outside the larder crates
    pub level: Level,
    /// Level for `larder_insight` and `larder_math`
    pub crate_level: Level,
    /// Emit one JSON object per event
    pub json_format: bool,
    /// Full filter directive, overrides both levels when set
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            crate_level: Level::INFO,
            json_format: false,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Verbose, human readable output.
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            crate_level: Level::DEBUG,
            json_format: false,
            env_filter: None,
        }
    }

    /// Quiet dependencies, JSON lines for log shippers.
    pub fn production() -> Self {
        Self {
            level: Level::WARN,
            crate_level: Level::INFO,
            json_format: true,
            env_filter: None,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_crate_level(mut self, level: Level) -> Self {
        self.crate_level = level;
        self
    }

    pub fn with_json_format(mut self, enabled: bool) -> Self {
        self.json_format = enabled;
        self
    }

    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter directive handed to `EnvFilter` when `RUST_LOG` is unset.
    pub fn env_filter(&self) -> String {
        if let Some(ref filter) = self.env_filter {
            return filter.clone();
        }

        let level = self.level.as_str().to_lowercase();
        let crate_level = self.crate_level.as_str().to_lowercase();
        format!(
            "{},larder_insight={},larder_math={}",
            level, crate_level, crate_level
        )
    }
}

/// Install a global subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Fails if a global
/// subscriber is already set.
///
/// ```rust,no_run
/// use larder_insight::logging::{init_logging, LoggingConfig};
///
/// init_logging(LoggingConfig::development().with_json_format(true)).unwrap();
/// ```
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

    let fmt_layer = if config.json_format {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| InsightError::LoggingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let config = LoggingConfig::default();
        assert_eq!(
            config.env_filter(),
            "info,larder_insight=info,larder_math=info"
        );
    }

    #[test]
    fn test_presets() {
        let dev = LoggingConfig::development();
        assert_eq!(dev.level, Level::DEBUG);
        assert!(!dev.json_format);

        let prod = LoggingConfig::production();
        assert_eq!(prod.level, Level::WARN);
        assert_eq!(prod.crate_level, Level::INFO);
        assert!(prod.json_format);
        assert_eq!(prod.env_filter(), "warn,larder_insight=info,larder_math=info");
    }

    #[test]
    fn test_filter_override() {
        let config = LoggingConfig::default()
            .with_crate_level(Level::TRACE)
            .with_env_filter("larder_math=debug");
        assert_eq!(config.env_filter(), "larder_math=debug");
    }
}
