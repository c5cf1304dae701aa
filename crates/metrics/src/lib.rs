//! Return-based metrics for the indicator system.
//!
//! This crate handles:
//! - Compounded total return
//! - Confidence rating of the mean return (one-sample z-test)
//! - Assembly of the metrics table

pub mod confidence;
pub mod engine;
pub mod total_return;

pub use confidence::{confidence_rating, ConfidenceLevel, ConfidenceRating};
pub use engine::{basic_metrics, compute_metric, confidence_ratings, metrics, MetricsCalculator};
pub use total_return::total_return;
