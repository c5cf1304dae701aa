//! Metrics table assembly.
//!
//! Each metric row is computed independently from the returns table.
//! Requesting a catalogued metric that has no implementation fails with
//! [`Error::UnimplementedMetric`] instead of producing a placeholder row.

use crate::confidence::{confidence_rating, ConfidenceRating};
use crate::total_return::total_return;
use indicator_core::{ConfidenceConfig, Error, Frame, Metric, MetricsTable, Result, ReturnsTable};

/// Metrics calculator bound to one confidence configuration.
#[derive(Debug, Clone, Default)]
pub struct MetricsCalculator {
    config: ConfidenceConfig,
}

impl MetricsCalculator {
    /// Create a new metrics calculator.
    pub fn new(config: ConfidenceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Calculate the implemented metrics.
    pub fn calculate(&self, returns: &ReturnsTable) -> Result<MetricsTable> {
        basic_metrics(returns, &self.config)
    }

    /// Calculate a chosen set of metrics, in the given order.
    pub fn calculate_only(&self, returns: &ReturnsTable, requested: &[Metric]) -> Result<MetricsTable> {
        metrics(returns, requested, &self.config)
    }

    /// Per-column z-test details.
    pub fn ratings(&self, returns: &ReturnsTable) -> Vec<Result<ConfidenceRating>> {
        confidence_ratings(returns, &self.config)
    }
}

/// Total return and confidence level for every asset.
pub fn basic_metrics(returns: &ReturnsTable, config: &ConfidenceConfig) -> Result<MetricsTable> {
    metrics(returns, Metric::BASIC, config)
}

/// Build a metrics table with one row per requested metric.
pub fn metrics(
    returns: &ReturnsTable,
    requested: &[Metric],
    config: &ConfidenceConfig,
) -> Result<MetricsTable> {
    config.validate()?;
    let mut rows = Vec::with_capacity(requested.len());
    for (i, &metric) in requested.iter().enumerate() {
        if requested[..i].contains(&metric) {
            return Err(Error::invalid_input(format!(
                "metric '{}' requested twice",
                metric
            )));
        }
        rows.push(compute_metric(metric, returns, config)?);
    }
    Frame::from_rows(requested.to_vec(), returns.columns().to_vec(), rows)
}

/// One metric row, a cell per asset column.
///
/// Confidence levels that are undefined for a single column (degenerate or
/// too few observations) become `None`; other failures abort.
pub fn compute_metric(
    metric: Metric,
    returns: &ReturnsTable,
    config: &ConfidenceConfig,
) -> Result<Vec<Option<f64>>> {
    if !metric.is_implemented() {
        return Err(Error::UnimplementedMetric(metric));
    }
    if returns.n_rows() == 0 {
        return Err(Error::insufficient_data(format!(
            "no returns to compute '{}' from",
            metric
        )));
    }

    match metric {
        Metric::TotalReturn => (0..returns.n_cols())
            .map(|col| total_return(&column(returns, col)).map(Some))
            .collect(),
        Metric::ReturnsConfidenceLevel => returns
            .columns()
            .iter()
            .zip(confidence_ratings(returns, config))
            .map(|(name, rating)| match rating {
                Ok(rating) => Ok(Some(f64::from(rating.level.as_u8()))),
                Err(err) if err.is_column_local() => {
                    tracing::warn!(column = %name, error = %err, "Confidence level undefined");
                    Ok(None)
                }
                Err(err) => Err(err),
            })
            .collect(),
        other => Err(Error::UnimplementedMetric(other)),
    }
}

/// Run the z-test on every column, in column order.
pub fn confidence_ratings(
    returns: &ReturnsTable,
    config: &ConfidenceConfig,
) -> Vec<Result<ConfidenceRating>> {
    returns
        .columns()
        .iter()
        .enumerate()
        .map(|(col, name)| confidence_rating(name, &column(returns, col), config))
        .collect()
}

fn column(returns: &ReturnsTable, col: usize) -> Vec<f64> {
    returns.column(col).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn returns(columns: &[&str], data: Vec<Vec<f64>>) -> ReturnsTable {
        // `data` is column-major for readability.
        let n_rows = data.first().map_or(0, |c| c.len());
        let rows = (0..n_rows)
            .map(|r| data.iter().map(|c| c[r]).collect())
            .collect();
        Frame::from_rows(
            (0..n_rows as i64).collect(),
            columns.iter().map(|s| s.to_string()).collect(),
            rows,
        )
        .unwrap()
    }

    fn alternating(a: f64, b: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| if i % 2 == 0 { a } else { b }).collect()
    }

    #[test]
    fn test_basic_metrics_rows() {
        let table = returns(
            &["UP", "FLAT"],
            vec![vec![0.02; 40], alternating(-0.01, 0.01, 40)],
        );

        let metrics = basic_metrics(&table, &ConfidenceConfig::default()).unwrap();

        assert_eq!(metrics.index(), Metric::BASIC);
        assert_eq!(metrics.columns(), table.columns());

        let up = metrics.value(Metric::TotalReturn, "UP").unwrap().unwrap();
        assert_relative_eq!(up, 1.02_f64.powi(40) - 1.0, epsilon = 1e-9);

        assert_eq!(metrics.value(Metric::ReturnsConfidenceLevel, "UP"), Some(Some(3.0)));
        assert_eq!(metrics.value(Metric::ReturnsConfidenceLevel, "FLAT"), Some(Some(0.0)));
        assert_eq!(metrics.value(Metric::Volatility, "UP"), None);
    }

    #[test]
    fn test_two_tailed_table_cell() {
        // z ~ 1.81: one tail lands at level 2, two tails at level 1.
        let table = returns(&["A"], vec![alternating(-0.0071, 0.0129, 40)]);
        let two_tailed = ConfidenceConfig {
            two_tailed: true,
            ..ConfidenceConfig::default()
        };

        let one = basic_metrics(&table, &ConfidenceConfig::default()).unwrap();
        let two = basic_metrics(&table, &two_tailed).unwrap();

        assert_eq!(one.value(Metric::ReturnsConfidenceLevel, "A"), Some(Some(2.0)));
        assert_eq!(two.value(Metric::ReturnsConfidenceLevel, "A"), Some(Some(1.0)));
        assert_eq!(
            one.value(Metric::TotalReturn, "A"),
            two.value(Metric::TotalReturn, "A")
        );
    }

    #[test]
    fn test_degenerate_column_is_undefined() {
        let table = returns(&["A", "B"], vec![vec![0.0; 40], vec![0.01; 40]]);

        let metrics = basic_metrics(&table, &ConfidenceConfig::default()).unwrap();

        assert_eq!(metrics.value(Metric::ReturnsConfidenceLevel, "A"), Some(None));
        assert_eq!(metrics.value(Metric::ReturnsConfidenceLevel, "B"), Some(Some(3.0)));
        // Total return is still defined for the degenerate column.
        assert_eq!(metrics.value(Metric::TotalReturn, "A"), Some(Some(0.0)));

        let ratings = confidence_ratings(&table, &ConfidenceConfig::default());
        assert!(matches!(ratings[0], Err(Error::DegenerateColumn { .. })));
        assert!(ratings[1].is_ok());
    }

    #[test]
    fn test_unimplemented_metric_errors() {
        let table = returns(&["A"], vec![vec![0.01, 0.02]]);
        for &metric in Metric::ALL.iter().filter(|m| !m.is_implemented()) {
            let err = compute_metric(metric, &table, &ConfidenceConfig::default()).unwrap_err();
            assert!(matches!(err, Error::UnimplementedMetric(m) if m == metric));
        }

        let err = metrics(
            &table,
            &[Metric::TotalReturn, Metric::SharpeRatio],
            &ConfidenceConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnimplementedMetric(Metric::SharpeRatio)));
    }

    #[test]
    fn test_selected_metrics_in_order() {
        let table = returns(&["A"], vec![vec![0.1, 0.1]]);
        let calculator = MetricsCalculator::new(ConfidenceConfig::default()).unwrap();

        let metrics = calculator
            .calculate_only(&table, &[Metric::ReturnsConfidenceLevel, Metric::TotalReturn])
            .unwrap();

        assert_eq!(metrics.index(), &[Metric::ReturnsConfidenceLevel, Metric::TotalReturn]);
        assert_relative_eq!(metrics.value(Metric::TotalReturn, "A").unwrap().unwrap(), 0.21, epsilon = 1e-12);
    }

    #[test]
    fn test_duplicate_request_rejected() {
        let table = returns(&["A"], vec![vec![0.1, 0.1]]);
        let err = metrics(
            &table,
            &[Metric::TotalReturn, Metric::TotalReturn],
            &ConfidenceConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_empty_returns_insufficient() {
        let table = ReturnsTable::empty(vec!["A".to_string()]).unwrap();
        let err = basic_metrics(&table, &ConfidenceConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));
    }

    #[test]
    fn test_single_row_confidence_undefined() {
        let table = returns(&["A"], vec![vec![0.05]]);
        let metrics = basic_metrics(&table, &ConfidenceConfig::default()).unwrap();
        assert_eq!(metrics.value(Metric::TotalReturn, "A"), Some(Some(0.05)));
        assert_eq!(metrics.value(Metric::ReturnsConfidenceLevel, "A"), Some(None));
    }

    #[test]
    fn test_calculator_ratings() {
        let table = returns(&["A"], vec![alternating(0.0, 0.02, 40)]);
        let calculator = MetricsCalculator::default();
        let ratings = calculator.ratings(&table);
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].as_ref().unwrap().observations, 40);
        assert_eq!(calculator.calculate(&table).unwrap().n_rows(), 2);
    }
}
