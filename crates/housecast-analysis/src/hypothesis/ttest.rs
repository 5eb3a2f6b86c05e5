//! Student's independent two-sample t-test (pooled variance, two-sided).

use statrs::distribution::{ContinuousCDF, StudentsT};

use housecast_core::errors::AnalysisError;

use super::types::TestOutcome;
use crate::descriptive::{mean, variance};
use crate::Result;

/// Test whether two independent samples share a mean, assuming equal variances.
pub fn student_t_test(sample1: &[f64], sample2: &[f64]) -> Result<TestOutcome> {
    let (n1, n2) = (sample1.len(), sample2.len());
    if n1 < 2 || n2 < 2 {
        return Err(AnalysisError::InsufficientData {
            test: "t-test",
            required: 2,
            actual: n1.min(n2),
        });
    }

    let diff = mean(sample1) - mean(sample2);
    let df = (n1 + n2 - 2) as f64;
    let pooled = ((n1 - 1) as f64 * variance(sample1) + (n2 - 1) as f64 * variance(sample2)) / df;
    let se = (pooled * (1.0 / n1 as f64 + 1.0 / n2 as f64)).sqrt();

    if se <= 0.0 {
        // Both samples constant: identical means carry no evidence, distinct
        // means are infinitely significant.
        return Ok(if diff == 0.0 {
            TestOutcome::new(f64::NAN, 1.0)
        } else {
            TestOutcome::new(diff.signum() * f64::INFINITY, 0.0)
        });
    }

    let t = diff / se;
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| AnalysisError::InvalidArgument(format!("t distribution: {e}")))?;
    let p = 2.0 * dist.sf(t.abs());

    Ok(TestOutcome::new(t, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_samples() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let r = student_t_test(&a, &a).unwrap();
        assert!(r.statistic.abs() < 1e-12);
        assert!((r.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_known_value() {
        // t = -2.5 with 8 degrees of freedom; two-sided p ≈ 0.0369
        let a = [2.3, 2.5, 2.7, 2.9, 3.1];
        let b = [2.8, 3.0, 3.2, 3.4, 3.6];
        let r = student_t_test(&a, &b).unwrap();
        assert!((r.statistic + 2.5).abs() < 1e-9, "t = {}", r.statistic);
        assert!(r.p_value > 0.03 && r.p_value < 0.045, "p = {}", r.p_value);
    }

    #[test]
    fn test_constant_groups() {
        let r = student_t_test(&[1.0, 1.0], &[2.0, 2.0]).unwrap();
        assert_eq!(r.p_value, 0.0);
        let r = student_t_test(&[1.0, 1.0], &[1.0, 1.0]).unwrap();
        assert_eq!(r.p_value, 1.0);
    }

    #[test]
    fn test_too_small() {
        assert!(student_t_test(&[1.0], &[1.0, 2.0]).is_err());
    }
}
