//! Mann-Whitney U rank-sum test (two-sided).
//!
//! Exact null distribution when the smaller sample has at most 8
//! observations and there are no ties; otherwise the normal approximation
//! with tie and continuity corrections.

use statrs::distribution::{ContinuousCDF, Normal};

use housecast_core::errors::AnalysisError;

use super::ranks::rank_average;
use super::types::TestOutcome;
use crate::Result;

/// Largest smaller-sample size for the exact distribution.
const EXACT_MAX_MIN_N: usize = 8;

/// Two-sided Mann-Whitney U test. The reported statistic is `U1`, the U of
/// the first sample.
pub fn mann_whitney_u(sample1: &[f64], sample2: &[f64]) -> Result<TestOutcome> {
    let (n1, n2) = (sample1.len(), sample2.len());
    if n1 == 0 || n2 == 0 {
        return Err(AnalysisError::empty("Mann-Whitney U sample"));
    }

    let combined: Vec<f64> = sample1.iter().chain(sample2.iter()).copied().collect();
    let (ranks, tie_term) = rank_average(&combined);
    let r1: f64 = ranks[..n1].iter().sum();

    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let u1 = r1 - n1f * (n1f + 1.0) / 2.0;
    let u2 = n1f * n2f - u1;
    let u = u1.max(u2);

    let p = if n1.min(n2) <= EXACT_MAX_MIN_N && tie_term == 0.0 {
        2.0 * exact_sf(u, n1, n2)
    } else {
        asymptotic_p(u, n1f, n2f, tie_term)
    };

    Ok(TestOutcome::new(u1, p))
}

/// `P(U >= u)` under the null, from the coefficients of the Gaussian binomial
/// `[n1 + n2 choose m]_q`, `m = min(n1, n2)`.
fn exact_sf(u: f64, n1: usize, n2: usize) -> f64 {
    let m = n1.min(n2);
    let n = n1.max(n2);
    let max_u = m * n;

    // counts[k] = number of rank arrangements with U = k
    let mut counts = vec![0.0_f64; max_u + 1];
    counts[0] = 1.0;
    for i in 1..=m {
        // multiply by (1 - q^(n + i))
        let shift = n + i;
        for k in (shift..=max_u).rev() {
            counts[k] -= counts[k - shift];
        }
        // divide by (1 - q^i)
        for k in i..=max_u {
            counts[k] += counts[k - i];
        }
    }

    let total: f64 = counts.iter().sum();
    let start = u.ceil().max(0.0) as usize;
    if start > max_u {
        return 0.0;
    }
    counts[start..].iter().sum::<f64>() / total
}

fn asymptotic_p(u: f64, n1: f64, n2: f64, tie_term: f64) -> f64 {
    let n = n1 + n2;
    let mu = n1 * n2 / 2.0;
    let sigma = (n1 * n2 / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)))).sqrt();
    if sigma <= 0.0 || !sigma.is_finite() {
        return f64::NAN;
    }
    let z = (u - mu - 0.5) / sigma;
    2.0 * Normal::standard().sf(z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_distribution_sums() {
        // n1 = n2 = 2: U ∈ {0..4} with counts 1,1,2,1,1 over 6 arrangements
        assert!((exact_sf(4.0, 2, 2) - 1.0 / 6.0).abs() < 1e-12);
        assert!((exact_sf(3.0, 2, 2) - 2.0 / 6.0).abs() < 1e-12);
        assert!((exact_sf(0.0, 2, 2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_complete_separation_small_exact() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let r = mann_whitney_u(&a, &b).unwrap();
        assert_eq!(r.statistic, 0.0);
        // 2 * 1/20
        assert!((r.p_value - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_asymptotic_with_ties() {
        let a: Vec<f64> = (0..30).map(|i| (i % 5) as f64).collect();
        let b: Vec<f64> = (0..30).map(|i| (i % 5) as f64 + 3.0).collect();
        let r = mann_whitney_u(&a, &b).unwrap();
        assert!(r.p_value < 1e-4, "p = {}", r.p_value);
    }

    #[test]
    fn test_all_tied_is_uninformative() {
        let a = [2.0; 12];
        let b = [2.0; 12];
        let r = mann_whitney_u(&a, &b).unwrap();
        assert_eq!(r.p_value, 1.0);
    }

    #[test]
    fn test_empty_sample_errors() {
        assert!(mann_whitney_u(&[], &[1.0]).is_err());
    }
}
