//! Descriptive statistics for one numeric sample.

pub mod metrics;
pub mod moments;
pub mod quantile;
pub mod summary;

pub use metrics::{
    compute_metrics, compute_metrics_with_config, compute_metrics_with_multiplier, DescriptiveMetrics,
};
pub use moments::{kurtosis, mean, skewness, standardize, std_dev, variance};
pub use quantile::{median, percentile, sorted_copy};
pub use summary::{describe_continuous, summarize, ContinuousSummary};

use housecast_core::errors::AnalysisError;

use crate::Result;

/// Reject empty samples and samples with non-finite values.
pub(crate) fn ensure_finite(values: &[f64], context: &str) -> Result<()> {
    if values.is_empty() {
        return Err(AnalysisError::empty(context));
    }
    if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
        return Err(AnalysisError::InvalidArgument(format!(
            "{context}: value at index {idx} is not finite"
        )));
    }
    Ok(())
}
