//! Order statistics with linear interpolation.

use std::cmp::Ordering;

/// Copy and sort ascending. Callers guarantee the values are finite.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Compute percentile `p` (0-100) of a sorted slice using linear interpolation
/// between the closest ranks: `rank = p / 100 * (n - 1)`.
///
/// Returns `NaN` for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let p = p.clamp(0.0, 100.0);
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    if upper >= sorted.len() {
        sorted[sorted.len() - 1]
    } else if lower == upper || sorted[lower] == sorted[upper] {
        sorted[lower]
    } else {
        // The difference of two large finite values can overflow.
        (sorted[lower] * (1.0 - frac) + sorted[upper] * frac).clamp(sorted[lower], sorted[upper])
    }
}

/// Median of a sorted slice.
pub fn median(sorted: &[f64]) -> f64 {
    percentile(sorted, 50.0)
}
