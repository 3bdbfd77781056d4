//! Error types for decline forecasting
//!
//! Every failure is local and synchronous. Nothing here is retried: the engine is a pure
//! function of its inputs, so a failed call fails again with the same inputs.

use thiserror::Error;

use crate::decline::DeclineType;

/// Errors raised while building or evaluating a forecast
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Bad duration, day-count constants, or period bounds
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A parameter the selected curve depends on was not supplied
    #[error("missing parameter `{parameter}` for {curve} forecast")]
    MissingParameter {
        parameter: &'static str,
        curve: DeclineType,
    },

    /// Singular or non-physical inputs (De = 1, Dt >= Di, non-finite results)
    #[error("domain error: {0}")]
    DomainError(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl ForecastError {
    pub(crate) fn domain(message: impl Into<String>) -> Self {
        ForecastError::DomainError(message.into())
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        ForecastError::InvalidConfiguration(message.into())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ForecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_display() {
        let err = ForecastError::MissingParameter {
            parameter: "b",
            curve: DeclineType::Hyperbolic,
        };
        assert_eq!(err.to_string(), "missing parameter `b` for hyperbolic forecast");
    }

    #[test]
    fn test_domain_error_display() {
        let err = ForecastError::domain("De = 1 is singular");
        assert_eq!(err.to_string(), "domain error: De = 1 is singular");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "settings.json");
        let err: ForecastError = io.into();
        assert!(matches!(err, ForecastError::Io(_)));
    }
}
