//! Core types and configuration for the indicator system.
//!
//! This crate provides shared types used across all other crates:
//! - Labelled tables (prices, returns, metrics)
//! - The enumerated metric set
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod table;
pub mod types;

pub use config::{ConfidenceConfig, IndicatorConfig, ReturnsConfig, SmallSamplePolicy};
pub use error::{Error, Result};
pub use table::{Frame, MetricsTable, PriceTable, ReturnsTable};
pub use types::*;
