//! Size-based normality checker.

use std::fmt;

use housecast_core::config::AnalysisConfig;
use housecast_core::constants::{DEFAULT_ALPHA, DEFAULT_SHAPIRO_MAX_N, MIN_NORMALITY_SAMPLE};
use housecast_core::errors::AnalysisError;

use super::kolmogorov_smirnov::ks_test_standard_normal;
use super::shapiro_wilk::shapiro_wilk;
use crate::descriptive::{ensure_finite, standardize};
use crate::Result;

/// Test used for a normality decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalityMethod {
    ShapiroWilk,
    KolmogorovSmirnov,
}

impl NormalityMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShapiroWilk => "shapiro_wilk",
            Self::KolmogorovSmirnov => "kolmogorov_smirnov",
        }
    }
}

impl fmt::Display for NormalityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// P-value and the test that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalityOutcome {
    pub method: NormalityMethod,
    pub p_value: f64,
}

/// Normality checker with a significance level and a Shapiro-Wilk ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalityChecker {
    pub alpha: f64,
    pub shapiro_max_n: usize,
}

impl Default for NormalityChecker {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            shapiro_max_n: DEFAULT_SHAPIRO_MAX_N,
        }
    }
}

impl NormalityChecker {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            alpha: config.effective_alpha(),
            shapiro_max_n: config.effective_shapiro_max_n(),
        }
    }

    /// Standardize `sample` and run the size-appropriate test.
    ///
    /// Fails with `InsufficientData` below 3 observations and `ZeroVariance`
    /// for constant samples.
    pub fn test(&self, sample: &[f64]) -> Result<NormalityOutcome> {
        if sample.len() < MIN_NORMALITY_SAMPLE {
            return Err(AnalysisError::InsufficientData {
                test: "normality check",
                required: MIN_NORMALITY_SAMPLE,
                actual: sample.len(),
            });
        }
        ensure_finite(sample, "normality check")?;
        let standardized = standardize(sample).ok_or_else(|| AnalysisError::ZeroVariance {
            context: "normality check".to_string(),
        })?;

        if sample.len() <= self.shapiro_max_n {
            let result = shapiro_wilk(&standardized)?;
            Ok(NormalityOutcome {
                method: NormalityMethod::ShapiroWilk,
                p_value: result.p_value,
            })
        } else {
            let result = ks_test_standard_normal(&standardized)?;
            Ok(NormalityOutcome {
                method: NormalityMethod::KolmogorovSmirnov,
                p_value: result.p_value,
            })
        }
    }

    /// True iff the test's p-value exceeds `alpha`.
    pub fn is_normal(&self, sample: &[f64]) -> Result<bool> {
        Ok(self.test(sample)?.p_value > self.alpha)
    }
}

/// Decide whether `sample` is consistent with a normal distribution.
pub fn is_normal(sample: &[f64], alpha: f64) -> Result<bool> {
    NormalityChecker::new(alpha).is_normal(sample)
}

/// P-value of the size-appropriate normality test with default settings.
pub fn normality_p_value(sample: &[f64]) -> Result<f64> {
    Ok(NormalityChecker::default().test(sample)?.p_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{ContinuousCDF, Normal};

    fn normal_quantiles(n: usize, mean: f64, sd: f64) -> Vec<f64> {
        let normal = Normal::new(mean, sd).unwrap();
        (0..n)
            .map(|i| normal.inverse_cdf((i as f64 + 0.5) / n as f64))
            .collect()
    }

    #[test]
    fn test_small_sample_uses_shapiro() {
        let sample = normal_quantiles(30, 10.0, 2.0);
        let outcome = NormalityChecker::default().test(&sample).unwrap();
        assert_eq!(outcome.method, NormalityMethod::ShapiroWilk);
        assert!(outcome.p_value > 0.05);
    }

    #[test]
    fn test_large_sample_uses_ks() {
        let sample = normal_quantiles(120, -3.0, 0.5);
        let outcome = NormalityChecker::default().test(&sample).unwrap();
        assert_eq!(outcome.method, NormalityMethod::KolmogorovSmirnov);
        assert!(is_normal(&sample, 0.05).unwrap());
    }

    #[test]
    fn test_boundary_fifty_uses_shapiro() {
        let sample = normal_quantiles(50, 0.0, 1.0);
        let outcome = NormalityChecker::default().test(&sample).unwrap();
        assert_eq!(outcome.method, NormalityMethod::ShapiroWilk);
    }

    #[test]
    fn test_exponential_growth_not_normal() {
        let sample: Vec<f64> = (0..80).map(|i| (i as f64 / 8.0).exp()).collect();
        assert!(!is_normal(&sample, 0.05).unwrap());
    }

    #[test]
    fn test_insufficient_data() {
        assert!(matches!(
            is_normal(&[1.0, 2.0], 0.05),
            Err(AnalysisError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_constant_sample_zero_variance() {
        assert!(matches!(
            is_normal(&[2.0; 8], 0.05),
            Err(AnalysisError::ZeroVariance { .. })
        ));
    }
}
