//! Plain-text rendering of a metrics table.

use indicator_core::{Metric, MetricsTable};
use std::fmt::Write;

const MIN_CELL_WIDTH: usize = 12;
const UNDEFINED: &str = "undefined";

/// Render one line per metric with a header of asset names.
///
/// Confidence levels print as integers, other metrics with six decimals,
/// undefined cells as `undefined`.
pub fn render_metrics(table: &MetricsTable) -> String {
    let label_width = table
        .index()
        .iter()
        .map(|m| m.label().len())
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = table
        .columns()
        .iter()
        .map(|c| c.len().max(MIN_CELL_WIDTH))
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{:<label_width$}", "");
    for (name, width) in table.columns().iter().zip(widths.iter().copied()) {
        let _ = write!(out, " {:>width$}", name);
    }
    out.push('\n');

    for (metric, row) in table.rows() {
        let _ = write!(out, "{:<label_width$}", metric.label());
        for (cell, width) in row.iter().zip(widths.iter().copied()) {
            let _ = write!(out, " {:>width$}", format_cell(*metric, *cell));
        }
        out.push('\n');
    }
    out
}

fn format_cell(metric: Metric, cell: Option<f64>) -> String {
    match (metric, cell) {
        (_, None) => UNDEFINED.to_string(),
        (Metric::ReturnsConfidenceLevel, Some(level)) => format!("{:.0}", level),
        (_, Some(value)) => format!("{:.6}", value),
    }
}
