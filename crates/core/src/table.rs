//! Labelled two-dimensional tables.
//!
//! A [`Frame`] stores values row-major with one label per row and one
//! unique name per column. Prices, returns and metrics all share it and
//! differ only in their row label and cell types.

use crate::error::{Error, Result};
use crate::types::{format_timestamp, Metric, TimestampMs};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Price observations: time-indexed rows, one column per asset, `None` when missing.
pub type PriceTable = Frame<TimestampMs, Option<f64>>;

/// Cleaned period returns: same columns as the prices they came from.
pub type ReturnsTable = Frame<TimestampMs, f64>;

/// One row per metric, one column per asset. `None` marks an undefined value.
pub type MetricsTable = Frame<Metric, Option<f64>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrame<R, V>")]
pub struct Frame<R, V> {
    index: Vec<R>,
    columns: Vec<String>,
    /// Row-major cells, `index.len() * columns.len()` of them.
    values: Vec<V>,
}

/// Wire form of a [`Frame`], checked by [`Frame::new`] before use.
#[doc(hidden)]
#[derive(Deserialize)]
pub struct RawFrame<R, V> {
    index: Vec<R>,
    columns: Vec<String>,
    values: Vec<V>,
}

impl<R, V> TryFrom<RawFrame<R, V>> for Frame<R, V> {
    type Error = Error;

    fn try_from(raw: RawFrame<R, V>) -> Result<Self> {
        Frame::new(raw.index, raw.columns, raw.values)
    }
}

impl<R, V> Frame<R, V> {
    /// Build a frame from row-major values.
    pub fn new(index: Vec<R>, columns: Vec<String>, values: Vec<V>) -> Result<Self> {
        check_unique_columns(&columns)?;
        check_cell_count(index.len(), columns.len(), values.len())?;
        Ok(Self {
            index,
            columns,
            values,
        })
    }

    /// Build a frame from a list of rows.
    pub fn from_rows(index: Vec<R>, columns: Vec<String>, rows: Vec<Vec<V>>) -> Result<Self> {
        if rows.len() != index.len() {
            return Err(Error::invalid_input(format!(
                "{} row labels for {} rows",
                index.len(),
                rows.len()
            )));
        }
        let mut values = Vec::with_capacity(index.len() * columns.len());
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::invalid_input(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    columns.len()
                )));
            }
            values.extend(row);
        }
        Self::new(index, columns, values)
    }

    /// An empty frame that still carries its column names.
    pub fn empty(columns: Vec<String>) -> Result<Self> {
        Self::new(Vec::new(), columns, Vec::new())
    }

    #[inline]
    pub fn index(&self) -> &[R] {
        &self.index
    }

    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row-major cells.
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// True when the frame holds no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&V> {
        if row >= self.n_rows() || col >= self.n_cols() {
            return None;
        }
        self.values.get(row * self.n_cols() + col)
    }

    pub fn row(&self, row: usize) -> Option<&[V]> {
        if row >= self.n_rows() {
            return None;
        }
        let width = self.n_cols();
        Some(&self.values[row * width..(row + 1) * width])
    }

    /// Iterate the rows together with their labels.
    pub fn rows(&self) -> impl Iterator<Item = (&R, &[V])> {
        // `max(1)` keeps `chunks` valid for column-less frames, which have no cells anyway.
        self.index
            .iter()
            .zip(self.values.chunks(self.n_cols().max(1)))
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

}

impl<R, V: Clone> Frame<R, V> {
    /// Copy out one column, top to bottom.
    pub fn column(&self, col: usize) -> Option<Vec<V>> {
        if col >= self.n_cols() {
            return None;
        }
        Some(
            self.values
                .iter()
                .skip(col)
                .step_by(self.n_cols())
                .cloned()
                .collect(),
        )
    }

    pub fn column_by_name(&self, name: &str) -> Option<Vec<V>> {
        self.column_position(name).and_then(|col| self.column(col))
    }
}

impl PriceTable {
    /// Reject structurally invalid price tables.
    ///
    /// Missing values are allowed; they are handled by cleaning, not here.
    pub fn validate(&self) -> Result<()> {
        check_unique_columns(&self.columns)?;
        check_cell_count(self.n_rows(), self.n_cols(), self.values.len())?;
        if self.n_cols() == 0 {
            return Err(Error::invalid_input("price table has no asset columns"));
        }
        if self.n_rows() < 2 {
            return Err(Error::invalid_input(format!(
                "price table needs at least two time points, got {}",
                self.n_rows()
            )));
        }
        for pair in self.index.windows(2) {
            if pair[1] <= pair[0] {
                return Err(Error::invalid_input(format!(
                    "price index must be strictly ascending: {} follows {}",
                    format_timestamp(pair[1]),
                    format_timestamp(pair[0])
                )));
            }
        }
        for (ts, row) in self.rows() {
            for (col, value) in row.iter().enumerate() {
                if let Some(v) = value {
                    if !v.is_finite() {
                        return Err(Error::invalid_input(format!(
                            "non-numeric price {} for '{}' at {}",
                            v,
                            self.columns[col],
                            format_timestamp(*ts)
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Count of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}

impl MetricsTable {
    /// Values of one metric row, if present.
    pub fn metric(&self, metric: Metric) -> Option<&[Option<f64>]> {
        let pos = self.index.iter().position(|m| *m == metric)?;
        self.row(pos)
    }

    /// A single metric value for one asset. The outer `None` means the
    /// row or column is absent; the inner one is an undefined value.
    pub fn value(&self, metric: Metric, asset: &str) -> Option<Option<f64>> {
        let col = self.column_position(asset)?;
        self.metric(metric).map(|row| row[col])
    }
}

fn check_cell_count(rows: usize, cols: usize, cells: usize) -> Result<()> {
    if cells != rows * cols {
        return Err(Error::invalid_input(format!(
            "expected {} cells for {} rows x {} columns, got {}",
            rows * cols,
            rows,
            cols,
            cells
        )));
    }
    Ok(())
}

fn check_unique_columns(columns: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for name in columns {
        if !seen.insert(name.as_str()) {
            return Err(Error::invalid_input(format!(
                "duplicate column '{}'",
                name
            )));
        }
    }
    Ok(())
}
