//! Error types for the larder_insight crate

use larder_math::MathError;
use thiserror::Error;

/// Custom error types for the larder_insight crate
#[derive(Debug, Error)]
pub enum InsightError {
    /// Input series or labels rejected before analysis
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration value out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from the statistics core
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON encoding or decoding
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Tracing subscriber could not be installed
    #[error("Logging error: {0}")]
    LoggingError(String),

    /// Error from parsing a date label
    #[error("Date parse error: {0}")]
    DateParseError(#[from] chrono::ParseError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, InsightError>;
