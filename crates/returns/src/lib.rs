//! Return computation for the indicator system.
//!
//! This crate handles:
//! - Forward filling of missing prices
//! - Dropping incomplete rows
//! - Simple period returns
//! - Global outlier suppression

pub mod cleaning;
pub mod engine;

pub use cleaning::{drop_incomplete_rows, forward_fill};
pub use engine::{clip_outliers, get_returns, pct_change, ReturnEngine};
