//! Return-based indicators over a price table.
//!
//! This crate provides:
//! - The [`Indicator`] object, built once from prices
//! - Plain-text rendering of the metrics table
//!
//! Engines and types are re-exported so a caller only depends on this crate.

pub mod indicator;
pub mod report;

pub use indicator::Indicator;
pub use report::render_metrics;

pub use indicator_core::{
    ConfidenceConfig, Error, Frame, IndicatorConfig, Metric, MetricsTable, PriceTable, Result,
    ReturnsConfig, ReturnsTable, SmallSamplePolicy, TimestampMs,
};
pub use indicator_metrics::{
    basic_metrics, confidence_rating, metrics, total_return, ConfidenceLevel, ConfidenceRating,
    MetricsCalculator,
};
pub use indicator_returns::{get_returns, ReturnEngine};
