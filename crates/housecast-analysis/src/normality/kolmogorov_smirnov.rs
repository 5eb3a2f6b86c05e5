//! One-sample Kolmogorov-Smirnov test against the standard normal.
//!
//! P-values use the Marsaglia-Tsang-Wang (2003) evaluation of the exact
//! distribution of `D_n` for n ≤ 10 000, and the asymptotic Kolmogorov
//! series above that.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::descriptive::{ensure_finite, sorted_copy};
use crate::Result;

/// Largest n evaluated with the exact distribution.
const EXACT_MAX_N: usize = 10_000;

/// Outcome of a Kolmogorov-Smirnov test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KolmogorovSmirnov {
    /// Two-sided statistic `D_n = sup |F_n(x) - Φ(x)|`.
    pub statistic: f64,
    pub p_value: f64,
}

/// Two-sided KS test of `sample` against N(0, 1).
///
/// The sample is used as given; standardize it first to test for normality
/// with unknown parameters.
pub fn ks_test_standard_normal(sample: &[f64]) -> Result<KolmogorovSmirnov> {
    ensure_finite(sample, "Kolmogorov-Smirnov")?;

    let normal = Normal::standard();
    let sorted = sorted_copy(sample);
    let n = sorted.len();
    let nf = n as f64;

    let statistic = sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let cdf = normal.cdf(x);
            let d_plus = (i + 1) as f64 / nf - cdf;
            let d_minus = cdf - i as f64 / nf;
            d_plus.max(d_minus)
        })
        .fold(0.0_f64, f64::max);

    let p_value = (1.0 - kolmogorov_cdf(n, statistic)).clamp(0.0, 1.0);

    Ok(KolmogorovSmirnov { statistic, p_value })
}

/// `P(D_n < d)`.
pub fn kolmogorov_cdf(n: usize, d: f64) -> f64 {
    if n == 0 || d <= 0.0 {
        return 0.0;
    }
    if d >= 1.0 {
        return 1.0;
    }
    let nf = n as f64;
    // D_n >= 1/(2n) always.
    if d <= 0.5 / nf {
        return 0.0;
    }
    if n > EXACT_MAX_N {
        return asymptotic_cdf(d * nf.sqrt());
    }

    let s = d * d * nf;
    if s > 7.24 || (s > 3.76 && n > 99) {
        return 1.0 - 2.0 * (-(2.000071 + 0.331 / nf.sqrt() + 1.409 / nf) * s).exp();
    }
    marsaglia_tsang_wang(n, d)
}

/// Kolmogorov limiting distribution `P(sqrt(n) D_n < t)`.
fn asymptotic_cdf(t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    let mut sum = 0.0;
    for k in 1..=100 {
        let kf = k as f64;
        let term = (-2.0 * kf * kf * t * t).exp();
        sum += if k % 2 == 1 { term } else { -term };
        if term < 1e-16 {
            break;
        }
    }
    (1.0 - 2.0 * sum).clamp(0.0, 1.0)
}

/// Exact `P(D_n < d)` via the `m x m` matrix power of Marsaglia, Tsang and
/// Wang. Exponents are tracked separately to avoid overflow.
fn marsaglia_tsang_wang(n: usize, d: f64) -> f64 {
    let nf = n as f64;
    let k = (nf * d) as usize + 1;
    let m = 2 * k - 1;
    let h = k as f64 - nf * d;

    let mut hm = vec![0.0; m * m];
    for i in 0..m {
        for j in 0..m {
            hm[i * m + j] = if i + 1 >= j { 1.0 } else { 0.0 };
        }
    }
    for i in 0..m {
        hm[i * m] -= h.powi(i as i32 + 1);
        hm[(m - 1) * m + i] -= h.powi((m - i) as i32);
    }
    if 2.0 * h - 1.0 > 0.0 {
        hm[(m - 1) * m] += (2.0 * h - 1.0).powi(m as i32);
    }
    for i in 0..m {
        for j in 0..m {
            if i + 1 > j {
                for g in 1..=(i + 1 - j) {
                    hm[i * m + j] /= g as f64;
                }
            }
        }
    }

    let (q, mut exponent) = matrix_power(&hm, m, n);
    let mut s = q[(k - 1) * m + (k - 1)];
    for i in 1..=n {
        s = s * i as f64 / nf;
        if s < 1e-140 {
            s *= 1e140;
            exponent -= 140;
        }
    }
    (s * 10f64.powi(exponent)).clamp(0.0, 1.0)
}

fn matrix_multiply(a: &[f64], b: &[f64], m: usize) -> Vec<f64> {
    let mut c = vec![0.0; m * m];
    for i in 0..m {
        for l in 0..m {
            let ail = a[i * m + l];
            if ail == 0.0 {
                continue;
            }
            for j in 0..m {
                c[i * m + j] += ail * b[l * m + j];
            }
        }
    }
    c
}

/// `a^n` with a base-10 exponent, rescaling whenever the centre entry
/// exceeds 1e140.
fn matrix_power(a: &[f64], m: usize, n: usize) -> (Vec<f64>, i32) {
    if n == 1 {
        return (a.to_vec(), 0);
    }
    let (half, half_exp) = matrix_power(a, m, n / 2);
    let squared = matrix_multiply(&half, &half, m);
    let mut exponent = 2 * half_exp;
    let mut v = if n % 2 == 0 {
        squared
    } else {
        matrix_multiply(a, &squared, m)
    };
    let centre = (m / 2) * m + m / 2;
    if v[centre] > 1e140 {
        for x in v.iter_mut() {
            *x *= 1e-140;
        }
        exponent += 140;
    }
    (v, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdf_bounds() {
        assert_eq!(kolmogorov_cdf(10, 0.0), 0.0);
        assert_eq!(kolmogorov_cdf(10, 1.0), 1.0);
        assert_eq!(kolmogorov_cdf(10, 0.01), 0.0);
    }

    #[test]
    fn test_cdf_known_value() {
        // Published check value from Marsaglia et al.: K(10, 0.274) ≈ 0.6284796154565043
        let v = kolmogorov_cdf(10, 0.274);
        assert!((v - 0.628_479_615_456_504_3).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn test_cdf_monotone_in_d() {
        let mut prev = 0.0;
        for step in 1..50 {
            let d = step as f64 / 50.0;
            let v = kolmogorov_cdf(40, d);
            assert!(v + 1e-12 >= prev, "d={d}: {v} < {prev}");
            prev = v;
        }
    }

    #[test]
    fn test_asymptotic_matches_large_n_exact() {
        let n = 5000;
        let d = 0.015;
        let exact = kolmogorov_cdf(n, d);
        let approx = asymptotic_cdf(d * (n as f64).sqrt());
        assert!((exact - approx).abs() < 0.01, "exact {exact}, approx {approx}");
    }

    #[test]
    fn test_normal_quantiles_not_rejected() {
        let normal = Normal::standard();
        let n = 200;
        let sample: Vec<f64> = (0..n)
            .map(|i| normal.inverse_cdf((i as f64 + 0.5) / n as f64))
            .collect();
        let result = ks_test_standard_normal(&sample).unwrap();
        assert!(result.statistic < 0.01);
        assert!(result.p_value > 0.99);
    }

    #[test]
    fn test_shifted_sample_rejected() {
        let normal = Normal::standard();
        let n = 200;
        let sample: Vec<f64> = (0..n)
            .map(|i| normal.inverse_cdf((i as f64 + 0.5) / n as f64) + 1.0)
            .collect();
        let result = ks_test_standard_normal(&sample).unwrap();
        assert!(result.p_value < 1e-6);
    }
}
