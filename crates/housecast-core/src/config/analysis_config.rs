//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALPHA, DEFAULT_CAPPING_LOWER_PERCENTILE, DEFAULT_CAPPING_UPPER_PERCENTILE,
    DEFAULT_FENCE_MULTIPLIER, DEFAULT_SHAPIRO_MAX_N,
};

/// Configuration for the statistics engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Significance level for normality checks. Default: 0.05.
    pub alpha: Option<f64>,
    /// Largest sample checked with Shapiro-Wilk. Default: 50.
    pub shapiro_max_n: Option<usize>,
    /// IQR multiplier for the metric fences. Default: 1.5.
    pub fence_multiplier: Option<f64>,
    /// Lower percentile for outlier capping. Default: 0.
    pub capping_lower_percentile: Option<f64>,
    /// Upper percentile for outlier capping. Default: 99.5.
    pub capping_upper_percentile: Option<f64>,
}

impl AnalysisConfig {
    /// Returns the effective alpha, defaulting to 0.05.
    pub fn effective_alpha(&self) -> f64 {
        self.alpha.unwrap_or(DEFAULT_ALPHA)
    }

    /// Returns the effective Shapiro-Wilk ceiling, defaulting to 50.
    pub fn effective_shapiro_max_n(&self) -> usize {
        self.shapiro_max_n.unwrap_or(DEFAULT_SHAPIRO_MAX_N)
    }

    /// Returns the effective fence multiplier, defaulting to 1.5.
    pub fn effective_fence_multiplier(&self) -> f64 {
        self.fence_multiplier.unwrap_or(DEFAULT_FENCE_MULTIPLIER)
    }

    /// Returns the effective `(lower, upper)` capping percentiles.
    pub fn effective_capping_percentiles(&self) -> (f64, f64) {
        (
            self.capping_lower_percentile
                .unwrap_or(DEFAULT_CAPPING_LOWER_PERCENTILE),
            self.capping_upper_percentile
                .unwrap_or(DEFAULT_CAPPING_UPPER_PERCENTILE),
        )
    }
}
