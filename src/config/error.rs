//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Minimum booking lead time cannot be negative (got {0})")]
    NegativeLeadTime(i64),

    #[error("{field} of {value} days exceeds the limit of {limit} days")]
    DaysOutOfRange {
        field: &'static str,
        value: i64,
        limit: i64,
    },

    #[error("Maximum booking window ({max}) is shorter than the minimum lead time ({min})")]
    BookingWindowInverted { min: i64, max: i64 },

    #[error("Invalid clinic hour {0} (expected 0-24)")]
    InvalidHour(u32),

    #[error("Opening hour {opening} must be before closing hour {closing}")]
    OpeningAfterClosing { opening: u32, closing: u32 },

    #[error("Log level filter cannot be empty")]
    EmptyLogLevel,
}
