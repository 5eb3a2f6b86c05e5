//! Univariate distribution plans: metrics plus a Sturges histogram.

use serde::Serialize;

use housecast_core::config::AnalysisConfig;
use housecast_core::errors::AnalysisError;

use crate::descriptive::{compute_metrics_with_config, ensure_finite, DescriptiveMetrics};
use crate::Result;

/// Sturges' rule, `round(1 + 3.3 * log10(n))`, at least one bin.
pub fn sturges_bins(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let k = (1.0 + 3.3 * (n as f64).log10()).round();
    (k as usize).max(1)
}

/// Equal-width histogram. `edges` has `counts.len() + 1` entries; the last
/// bin is closed on the right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Bin `values` into `bins` equal-width bins over their range. A constant
/// sample is binned over `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram> {
    ensure_finite(values, "histogram")?;
    if bins == 0 {
        return Err(AnalysisError::InvalidArgument(
            "histogram needs at least one bin".to_string(),
        ));
    }

    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Ok(Histogram { edges, counts })
}

/// Everything needed to draw a histogram-plus-boxplot panel for one variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionPlan {
    pub metrics: DescriptiveMetrics,
    pub histogram: Histogram,
}

pub fn distribution_plan(values: &[f64]) -> Result<DistributionPlan> {
    distribution_plan_with_config(values, &AnalysisConfig::default())
}

/// [`distribution_plan`] with the configured fence multiplier.
pub fn distribution_plan_with_config(
    values: &[f64],
    config: &AnalysisConfig,
) -> Result<DistributionPlan> {
    let metrics = compute_metrics_with_config(values, config)?;
    let histogram = histogram(values, sturges_bins(values.len()))?;
    Ok(DistributionPlan { metrics, histogram })
}
