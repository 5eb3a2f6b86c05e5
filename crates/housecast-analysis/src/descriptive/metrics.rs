//! Location and spread metrics with Tukey fences clamped to the observed range.

use serde::{Deserialize, Serialize};

use housecast_core::config::AnalysisConfig;
use housecast_core::constants::DEFAULT_FENCE_MULTIPLIER;
use housecast_core::errors::AnalysisError;

use super::ensure_finite;
use super::quantile::{median, percentile, sorted_copy};
use crate::Result;

/// Descriptive metrics for one numeric sample.
///
/// Fences never leave the observed range:
/// `lower_fence = max(Q1 - k*IQR, minimum)`, `upper_fence = min(Q3 + k*IQR, maximum)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveMetrics {
    pub minimum: f64,
    pub maximum: f64,
    pub mean: f64,
    pub median: f64,
    /// Smallest of the most frequent values.
    pub mode: f64,
    pub first_quartile: f64,
    pub third_quartile: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
}

impl DescriptiveMetrics {
    /// Interquartile range, `Q3 - Q1`.
    pub fn iqr(&self) -> f64 {
        self.third_quartile - self.first_quartile
    }
}

/// Compute metrics with the standard 1.5 fence multiplier.
pub fn compute_metrics(sample: &[f64]) -> Result<DescriptiveMetrics> {
    compute_metrics_with_multiplier(sample, DEFAULT_FENCE_MULTIPLIER)
}

/// Compute metrics with the configured `fence_multiplier`.
pub fn compute_metrics_with_config(
    sample: &[f64],
    config: &AnalysisConfig,
) -> Result<DescriptiveMetrics> {
    compute_metrics_with_multiplier(sample, config.effective_fence_multiplier())
}

/// Compute metrics with a custom IQR multiplier for the fences.
pub fn compute_metrics_with_multiplier(
    sample: &[f64],
    multiplier: f64,
) -> Result<DescriptiveMetrics> {
    ensure_finite(sample, "descriptive metrics")?;
    if !(multiplier >= 0.0 && multiplier.is_finite()) {
        return Err(AnalysisError::InvalidArgument(format!(
            "fence multiplier must be a non-negative number, got {multiplier}"
        )));
    }

    let sorted = sorted_copy(sample);
    let minimum = sorted[0];
    let maximum = sorted[sorted.len() - 1];
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let first_quartile = percentile(&sorted, 25.0);
    let third_quartile = percentile(&sorted, 75.0);
    let iqr = third_quartile - first_quartile;

    Ok(DescriptiveMetrics {
        minimum,
        maximum,
        mean,
        median: median(&sorted),
        mode: smallest_mode(&sorted),
        first_quartile,
        third_quartile,
        lower_fence: (first_quartile - multiplier * iqr).max(minimum),
        upper_fence: (third_quartile + multiplier * iqr).min(maximum),
    })
}

/// Most frequent value of a sorted, non-empty slice; ties go to the smallest.
fn smallest_mode(sorted: &[f64]) -> f64 {
    let mut best = sorted[0];
    let mut best_count = 0usize;
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i;
        while j < sorted.len() && sorted[j] == sorted[i] {
            j += 1;
        }
        // Strictly greater keeps the earlier (smaller) value on ties.
        if j - i > best_count {
            best = sorted[i];
            best_count = j - i;
        }
        i = j;
    }
    best
}
