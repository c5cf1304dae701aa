//! Return Engine: price table in, cleaned returns table out.

use crate::cleaning::{drop_incomplete_rows, forward_fill};
use indicator_core::{Frame, PriceTable, Result, ReturnsConfig, ReturnsTable, TimestampMs};

/// Return Engine bound to one cleaning configuration.
#[derive(Debug, Clone, Default)]
pub struct ReturnEngine {
    config: ReturnsConfig,
}

impl ReturnEngine {
    /// Create a new engine, rejecting an invalid configuration.
    pub fn new(config: ReturnsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReturnsConfig {
        &self.config
    }

    /// Compute cleaned returns for a price table.
    pub fn compute(&self, prices: &PriceTable) -> Result<ReturnsTable> {
        get_returns(prices, &self.config)
    }
}

/// Turn a price table into a cleaned returns table.
///
/// Steps: optional forward fill, drop rows with any missing price, simple
/// period returns (first row dropped), then global outlier clipping. The
/// caller's table is never modified.
///
/// If fewer than two complete rows survive the result has no rows; the
/// metrics stage reports that as insufficient data.
pub fn get_returns(prices: &PriceTable, config: &ReturnsConfig) -> Result<ReturnsTable> {
    config.validate()?;
    prices.validate()?;
    tracing::debug!(
        rows = prices.n_rows(),
        assets = prices.n_cols(),
        missing = prices.missing_count(),
        forward_fill = config.forward_fill,
        "Computing returns"
    );

    let complete = if config.forward_fill {
        drop_incomplete_rows(&forward_fill(prices)?)?
    } else {
        drop_incomplete_rows(prices)?
    };

    if complete.n_rows() < 2 {
        tracing::warn!(
            rows = complete.n_rows(),
            input_rows = prices.n_rows(),
            "Not enough complete price rows to compute returns"
        );
        return ReturnsTable::empty(prices.columns().to_vec());
    }

    let returns = pct_change(&complete)?;
    clip_outliers(&returns, config.percentage_outlier)
}

/// Simple period returns `p[t] / p[t-1] - 1`.
///
/// The leading row has no prior price and is dropped, as is any later row
/// where no column produced a number.
pub fn pct_change(prices: &Frame<TimestampMs, f64>) -> Result<ReturnsTable> {
    let width = prices.n_cols();
    let mut index = Vec::with_capacity(prices.n_rows().saturating_sub(1));
    let mut values = Vec::with_capacity(prices.values().len().saturating_sub(width));

    let mut rows = prices.rows();
    let Some((_, mut prev)) = rows.next() else {
        return ReturnsTable::empty(prices.columns().to_vec());
    };

    for (ts, row) in rows {
        let changes: Vec<f64> = row
            .iter()
            .zip(prev)
            .map(|(price, last)| price / last - 1.0)
            .collect();
        if !changes.iter().all(|r| r.is_nan()) {
            index.push(*ts);
            values.extend(changes);
        }
        prev = row;
    }

    Frame::new(index, prices.columns().to_vec(), values)
}

/// Replace every return strictly beyond `+/- threshold` with `0`.
///
/// The threshold applies to the whole table as one pool, not per column.
/// Values exactly at the bound are kept. A NaN return (from a `0/0` price
/// change) is treated as an outlier too.
pub fn clip_outliers(returns: &ReturnsTable, threshold: f64) -> Result<ReturnsTable> {
    let mut zeroed = 0usize;
    let values: Vec<f64> = returns
        .values()
        .iter()
        .map(|&r| {
            if r > threshold || r < -threshold || r.is_nan() {
                zeroed += 1;
                0.0
            } else {
                r
            }
        })
        .collect();

    if zeroed > 0 {
        tracing::debug!(zeroed, threshold, "Zeroed outlier returns");
    }

    Frame::new(returns.index().to_vec(), returns.columns().to_vec(), values)
}
