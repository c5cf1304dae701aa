//! Missing-data handling for price tables.

use indicator_core::{Frame, PriceTable, Result, TimestampMs};

/// Fill each missing price with the most recent present price in the same column.
///
/// Leading gaps (nothing observed yet) stay missing.
pub fn forward_fill(prices: &PriceTable) -> Result<PriceTable> {
    let mut last: Vec<Option<f64>> = vec![None; prices.n_cols()];
    let mut values = Vec::with_capacity(prices.values().len());

    for (_, row) in prices.rows() {
        for (col, cell) in row.iter().enumerate() {
            if cell.is_some() {
                last[col] = *cell;
            }
            values.push(last[col]);
        }
    }

    Frame::new(prices.index().to_vec(), prices.columns().to_vec(), values)
}

/// Keep only rows where every asset has a price.
pub fn drop_incomplete_rows(prices: &PriceTable) -> Result<Frame<TimestampMs, f64>> {
    let mut index = Vec::with_capacity(prices.n_rows());
    let mut values = Vec::with_capacity(prices.values().len());

    for (ts, row) in prices.rows() {
        let complete: Option<Vec<f64>> = row.iter().copied().collect();
        if let Some(complete) = complete {
            index.push(*ts);
            values.extend(complete);
        }
    }

    let dropped = prices.n_rows() - index.len();
    if dropped > 0 {
        tracing::debug!(dropped, kept = index.len(), "Dropped incomplete price rows");
    }

    Frame::new(index, prices.columns().to_vec(), values)
}
