//! Error types for the indicator system.

use crate::types::Metric;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the indicator system.
#[derive(Error, Debug)]
pub enum Error {
    /// Structurally invalid input table (empty, too short, non-numeric, bad shape).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for computation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Zero deviation with a mean equal to the reference value; the z-score is undefined.
    #[error("Degenerate column '{column}': zero standard deviation and mean equal to reference")]
    DegenerateColumn { column: String },

    /// Metric exists in the catalogue but has no implementation.
    #[error("Metric not implemented: {0}")]
    UnimplementedMetric(Metric),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure inside the statistics backend.
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create an insufficient data error.
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Error::InsufficientData(msg.into())
    }

    /// Create a degenerate column error.
    pub fn degenerate_column(column: impl Into<String>) -> Self {
        Error::DegenerateColumn {
            column: column.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a statistics error.
    pub fn statistics(msg: impl Into<String>) -> Self {
        Error::Statistics(msg.into())
    }

    /// Whether a confidence rating failure should degrade to an undefined cell
    /// instead of aborting the whole metrics table.
    pub fn is_column_local(&self) -> bool {
        matches!(
            self,
            Error::DegenerateColumn { .. } | Error::InsufficientData(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::degenerate_column("AAPL");
        assert!(err.to_string().contains("'AAPL'"));

        let err = Error::UnimplementedMetric(Metric::SharpeRatio);
        assert_eq!(err.to_string(), "Metric not implemented: sharpe_ratio");
    }

    #[test]
    fn test_column_local_errors() {
        assert!(Error::degenerate_column("x").is_column_local());
        assert!(Error::insufficient_data("n < 2").is_column_local());
        assert!(!Error::invalid_input("empty").is_column_local());
        assert!(!Error::UnimplementedMetric(Metric::Volatility).is_column_local());
    }
}
