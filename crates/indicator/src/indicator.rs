//! Eagerly computed indicators for one price table.

use crate::report::render_metrics;
use indicator_core::{IndicatorConfig, MetricsTable, PriceTable, Result, ReturnsTable};
use indicator_metrics::{confidence_ratings, ConfidenceRating, MetricsCalculator};
use indicator_returns::ReturnEngine;
use std::fmt;

/// Returns and metrics derived from a price table at construction time.
///
/// There is no update path; build a new `Indicator` for new prices.
#[derive(Debug, Clone)]
pub struct Indicator {
    prices: PriceTable,
    returns: ReturnsTable,
    metrics: MetricsTable,
    config: IndicatorConfig,
}

impl Indicator {
    /// Compute returns, then metrics.
    pub fn new(prices: PriceTable, config: IndicatorConfig) -> Result<Self> {
        config.validate()?;

        let returns = ReturnEngine::new(config.returns.clone())?.compute(&prices)?;
        let metrics = MetricsCalculator::new(config.confidence.clone())?.calculate(&returns)?;

        tracing::info!(
            assets = prices.n_cols(),
            price_rows = prices.n_rows(),
            return_rows = returns.n_rows(),
            "Indicator computed"
        );

        Ok(Self {
            prices,
            returns,
            metrics,
            config,
        })
    }

    /// Compute with default configuration.
    pub fn with_defaults(prices: PriceTable) -> Result<Self> {
        Self::new(prices, IndicatorConfig::default())
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    pub fn returns(&self) -> &ReturnsTable {
        &self.returns
    }

    pub fn metrics(&self) -> &MetricsTable {
        &self.metrics
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Full z-test details per asset, in column order.
    pub fn ratings(&self) -> Vec<Result<ConfidenceRating>> {
        confidence_ratings(&self.returns, &self.config.confidence)
    }

    /// Metrics table as JSON.
    pub fn metrics_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.metrics)?)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f, "METRICS")?;
        writeln!(f, "{}", "-".repeat(50))?;
        f.write_str(&render_metrics(&self.metrics))
    }
}
