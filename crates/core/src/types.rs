//! Core data types for the indicator system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// Render a timestamp for messages, falling back to the raw value when out of range.
pub fn format_timestamp(ts_ms: TimestampMs) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ts_ms) {
        Some(dt) => dt.to_rfc3339(),
        None => ts_ms.to_string(),
    }
}

/// Every metric the system knows about.
///
/// Only the variants listed in [`Metric::BASIC`] are implemented; the rest
/// are catalogued so that requesting them fails loudly instead of producing
/// a placeholder row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Compounded total return.
    #[serde(rename = "returns")]
    TotalReturn,
    /// Star-level significance of the mean return.
    #[serde(rename = "returns_confidence_level")]
    ReturnsConfidenceLevel,
    #[serde(rename = "volatility")]
    Volatility,
    #[serde(rename = "sharpe_ratio")]
    SharpeRatio,
    #[serde(rename = "tracking_error")]
    TrackingError,
    #[serde(rename = "information_ratio")]
    InformationRatio,
    #[serde(rename = "excess_returns")]
    ExcessReturns,
}

impl Metric {
    /// Implemented metrics, in report order.
    pub const BASIC: &'static [Metric] = &[Metric::TotalReturn, Metric::ReturnsConfidenceLevel];

    /// All catalogued metrics.
    pub const ALL: &'static [Metric] = &[
        Metric::TotalReturn,
        Metric::ReturnsConfidenceLevel,
        Metric::Volatility,
        Metric::SharpeRatio,
        Metric::TrackingError,
        Metric::InformationRatio,
        Metric::ExcessReturns,
    ];

    /// Stable row label used in metrics tables.
    pub fn label(self) -> &'static str {
        match self {
            Metric::TotalReturn => "returns",
            Metric::ReturnsConfidenceLevel => "returns_confidence_level",
            Metric::Volatility => "volatility",
            Metric::SharpeRatio => "sharpe_ratio",
            Metric::TrackingError => "tracking_error",
            Metric::InformationRatio => "information_ratio",
            Metric::ExcessReturns => "excess_returns",
        }
    }

    /// Look a metric up by its row label.
    pub fn from_label(label: &str) -> Option<Metric> {
        Metric::ALL.iter().copied().find(|m| m.label() == label)
    }

    #[inline]
    pub fn is_implemented(self) -> bool {
        Metric::BASIC.contains(&self)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
