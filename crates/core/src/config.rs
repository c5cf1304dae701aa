//! Configuration structures for the indicator system.
//!
//! Everything here is per-call: an [`IndicatorConfig`] is handed to the
//! engines explicitly and nothing is read from global state.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for an indicator run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Return cleaning configuration.
    pub returns: ReturnsConfig,
    /// Confidence rating configuration.
    pub confidence: ConfidenceConfig,
}

impl IndicatorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        self.returns.validate()?;
        self.confidence.validate()
    }
}

/// Return Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnsConfig {
    /// Propagate the last observed price into missing cells before cleaning.
    pub forward_fill: bool,
    /// Returns strictly beyond +/- this fraction are zeroed (1.0 = 100%).
    pub percentage_outlier: f64,
}

impl Default for ReturnsConfig {
    fn default() -> Self {
        Self {
            forward_fill: false,
            percentage_outlier: 1.0,
        }
    }
}

impl ReturnsConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.percentage_outlier.is_finite() || self.percentage_outlier <= 0.0 {
            return Err(Error::config(format!(
                "percentage_outlier must be finite and > 0, got {}",
                self.percentage_outlier
            )));
        }
        Ok(())
    }
}

/// What to do when a column has too few observations for a reliable z-test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmallSamplePolicy {
    /// Compute the rating and mark it as a small sample.
    #[default]
    Flag,
    /// Refuse with an insufficient data error.
    Refuse,
}

/// Confidence rating (one-sample z-test) configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Reference mean the sample mean is tested against.
    pub mu: f64,
    /// Double the one-sided tail probability.
    pub two_tailed: bool,
    /// Samples with this many observations or fewer are small.
    pub min_observations: usize,
    /// Handling of small samples.
    pub small_sample: SmallSamplePolicy,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            mu: 0.0,
            two_tailed: false,
            min_observations: 30,
            small_sample: SmallSamplePolicy::Flag,
        }
    }
}

impl ConfidenceConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.mu.is_finite() {
            return Err(Error::config(format!("mu must be finite, got {}", self.mu)));
        }
        Ok(())
    }
}
