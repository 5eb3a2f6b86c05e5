//! Kruskal-Wallis H test with tie correction.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use housecast_core::errors::AnalysisError;

use super::ranks::rank_average;
use super::types::TestOutcome;
use crate::Result;

/// Test whether `groups` come from the same distribution using ranks.
pub fn kruskal_wallis(groups: &[&[f64]]) -> Result<TestOutcome> {
    let k = groups.len();
    if k < 2 {
        return Err(AnalysisError::InsufficientData {
            test: "Kruskal-Wallis (groups)",
            required: 2,
            actual: k,
        });
    }
    if let Some(empty) = groups.iter().position(|g| g.is_empty()) {
        return Err(AnalysisError::empty(format!("Kruskal-Wallis group {empty}")));
    }

    let combined: Vec<f64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
    let n = combined.len() as f64;
    let (ranks, tie_term) = rank_average(&combined);

    let mut offset = 0;
    let mut sum_term = 0.0;
    for group in groups {
        let len = group.len();
        let rank_sum: f64 = ranks[offset..offset + len].iter().sum();
        sum_term += rank_sum * rank_sum / len as f64;
        offset += len;
    }

    let h_raw = 12.0 / (n * (n + 1.0)) * sum_term - 3.0 * (n + 1.0);
    let correction = 1.0 - tie_term / (n * n * n - n);
    if correction <= 0.0 {
        // Every observation tied.
        return Ok(TestOutcome::new(f64::NAN, 1.0));
    }
    let h = h_raw / correction;

    let dist = ChiSquared::new((k - 1) as f64)
        .map_err(|e| AnalysisError::InvalidArgument(format!("chi-squared distribution: {e}")))?;

    Ok(TestOutcome::new(h, dist.sf(h.max(0.0))))
}
