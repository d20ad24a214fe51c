//! APR aggregation over credit scores.

use crate::error::{AprError, AprResult};
use crate::types::CreditScore;

/// Compute the placeholder APR for a set of scores.
///
/// The mean is taken with integer division, divided by 100 with integer
/// division again, and only then converted to `f64`. Both truncations are
/// part of the result: `[250, 300]` yields `2.0`, not `2.75`.
pub fn calculate_apr(scores: &[CreditScore]) -> AprResult<f64> {
    if scores.is_empty() {
        return Err(AprError::AggregateInputEmpty);
    }

    let sum = scores
        .iter()
        .fold(0u64, |acc, credit| acc.saturating_add(credit.score));
    let mean = sum / scores.len() as u64;

    Ok((mean / 100) as f64)
}
