//! Confidence rating of a column's mean return.
//!
//! A one-sample z-test of the sample mean against a reference `mu`, with the
//! tail probability bucketed into star levels:
//!
//! | p             | level |
//! |---------------|-------|
//! | p < 0.01      | 3     |
//! | p < 0.05      | 2     |
//! | p < 0.1       | 1     |
//! | otherwise     | 0     |

use indicator_core::{ConfidenceConfig, Error, Result, SmallSamplePolicy};
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;

/// Ordinal significance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ConfidenceLevel {
    /// p >= 0.1.
    Insignificant = 0,
    /// 0.05 <= p < 0.1.
    Weak = 1,
    /// 0.01 <= p < 0.05.
    Moderate = 2,
    /// p < 0.01.
    Strong = 3,
}

impl ConfidenceLevel {
    pub fn from_p_value(p: f64) -> Self {
        if p < 0.01 {
            ConfidenceLevel::Strong
        } else if p < 0.05 {
            ConfidenceLevel::Moderate
        } else if p < 0.1 {
            ConfidenceLevel::Weak
        } else {
            ConfidenceLevel::Insignificant
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Outcome of the z-test on one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceRating {
    pub level: ConfidenceLevel,
    /// Signed z-score; infinite when the column is constant and differs from `mu`.
    pub z_score: f64,
    pub p_value: f64,
    pub observations: usize,
    /// Set when the sample had no more than the configured minimum observations.
    pub small_sample: bool,
}

/// Sample mean and sample standard deviation (`n - 1` denominator).
///
/// A constant column gets its exact value as mean and a deviation of exactly
/// zero, so rounding noise never turns it into a finite z-score.
pub fn mean_and_std(data: &[f64]) -> Option<(f64, f64)> {
    let first = *data.first()?;
    if data.len() < 2 {
        return None;
    }
    if data.iter().all(|&x| x == first) {
        return Some((first, 0.0));
    }
    Some((data.mean(), data.std_dev()))
}

/// `(mean - mu) / (std / sqrt(n))`, or `None` when it is `0 / 0`.
pub fn z_score(mean: f64, std: f64, n: usize, mu: f64) -> Option<f64> {
    let diff = mean - mu;
    if std == 0.0 {
        if diff == 0.0 {
            return None;
        }
        return Some(diff.signum() * f64::INFINITY);
    }
    Some(diff / (std / (n as f64).sqrt()))
}

/// Upper-tail standard normal probability of `|z|`, doubled for two tails.
pub fn p_value(z: f64, two_tailed: bool) -> Result<f64> {
    let normal = Normal::new(0.0, 1.0).map_err(|e| Error::statistics(e.to_string()))?;
    let tail = normal.sf(z.abs());
    Ok(if two_tailed { 2.0 * tail } else { tail })
}

/// Rate how confidently the column's mean return differs from `config.mu`.
///
/// `column` only labels errors and log lines.
pub fn confidence_rating(
    column: &str,
    data: &[f64],
    config: &ConfidenceConfig,
) -> Result<ConfidenceRating> {
    let n = data.len();
    let small_sample = n <= config.min_observations;
    if small_sample && config.small_sample == SmallSamplePolicy::Refuse {
        return Err(Error::insufficient_data(format!(
            "'{}' has {} observations, need more than {}",
            column, n, config.min_observations
        )));
    }

    let (mean, std) = mean_and_std(data).ok_or_else(|| {
        Error::insufficient_data(format!(
            "'{}' has {} observations, need at least 2 for a deviation",
            column, n
        ))
    })?;

    let z = z_score(mean, std, n, config.mu).ok_or_else(|| Error::degenerate_column(column))?;
    let p = p_value(z, config.two_tailed)?;
    let level = ConfidenceLevel::from_p_value(p);

    if small_sample {
        tracing::warn!(
            column,
            observations = n,
            min_observations = config.min_observations,
            "Confidence rating computed on a small sample"
        );
    }
    tracing::debug!(column, mean, std, z, p, level = level.as_u8(), "Confidence rating");

    Ok(ConfidenceRating {
        level,
        z_score: z,
        p_value: p,
        observations: n,
        small_sample,
    })
}
