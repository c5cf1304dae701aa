//! Geometric compounding of period returns.

use indicator_core::{Error, Result};

/// Compounded return `prod(1 + r) - 1`.
///
/// A single period is returned as-is rather than round-tripped through `1 + r`.
pub fn total_return(returns: &[f64]) -> Result<f64> {
    match returns {
        [] => Err(Error::insufficient_data(
            "total return needs at least one period return",
        )),
        [single] => Ok(*single),
        _ => Ok(returns.iter().map(|r| 1.0 + r).product::<f64>() - 1.0),
    }
}
