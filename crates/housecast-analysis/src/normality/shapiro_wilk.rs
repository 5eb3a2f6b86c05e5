//! Shapiro-Wilk W test (3 ≤ n ≤ 5000).
//!
//! Coefficients and p-value follow Royston's AS R94 approximation: the
//! weights come from normal order-statistic expectations with polynomial
//! corrections for the two most extreme pairs, and `ln(1 - W)` is mapped to a
//! standard normal deviate.

use statrs::distribution::{ContinuousCDF, Normal};

use housecast_core::constants::{MAX_SHAPIRO_SAMPLE, MIN_NORMALITY_SAMPLE};
use housecast_core::errors::AnalysisError;

use crate::descriptive::{ensure_finite, sorted_copy};
use crate::Result;

/// Smallest accepted sample.
pub const MIN_N: usize = MIN_NORMALITY_SAMPLE;
/// Largest sample for which the approximation holds.
pub const MAX_N: usize = MAX_SHAPIRO_SAMPLE;

const SMALL: f64 = 1e-19;

// Polynomial coefficients from AS R94.
const G: [f64; 2] = [-2.273, 0.459];
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.5440, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];

/// Outcome of a Shapiro-Wilk test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    pub statistic: f64,
    pub p_value: f64,
}

/// Run the Shapiro-Wilk test on `sample`.
pub fn shapiro_wilk(sample: &[f64]) -> Result<ShapiroWilk> {
    let n = sample.len();
    if n < MIN_N {
        return Err(AnalysisError::InsufficientData {
            test: "Shapiro-Wilk",
            required: MIN_N,
            actual: n,
        });
    }
    if n > MAX_N {
        return Err(AnalysisError::InvalidArgument(format!(
            "Shapiro-Wilk supports at most {MAX_N} observations, got {n}"
        )));
    }
    ensure_finite(sample, "Shapiro-Wilk")?;

    let sorted = sorted_copy(sample);
    let range = sorted[n - 1] - sorted[0];
    if range < SMALL {
        return Err(AnalysisError::ZeroVariance {
            context: "Shapiro-Wilk sample".to_string(),
        });
    }

    let a = coefficients(n);
    let w = w_statistic(&sorted, &a);
    let p_value = p_value(w, n);

    Ok(ShapiroWilk {
        statistic: w,
        p_value,
    })
}

/// Evaluate `c[0] + c[1]*x + c[2]*x^2 + ...`.
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &coef| acc * x + coef)
}

fn standard_normal() -> Normal {
    // Parameters are constant and valid.
    Normal::standard()
}

/// Half-vector of weights `a[0..n/2]`, positive, for the pairs
/// `(x[n-1-i] - x[i])`.
fn coefficients(n: usize) -> Vec<f64> {
    let half = n / 2;
    if n == 3 {
        return vec![std::f64::consts::FRAC_1_SQRT_2];
    }

    let normal = standard_normal();
    let an = n as f64;
    let an25 = an + 0.25;

    // Expected normal order statistics for the lower half (negative values).
    let m: Vec<f64> = (1..=half)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / an25))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;

    let mut a = vec![0.0; half];
    let (first_free, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
            .sqrt();
        a[1] = a2;
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
        (1, fac)
    };
    a[0] = a1;
    for i in first_free..half {
        a[i] = -m[i] / fac;
    }
    a
}

fn w_statistic(sorted: &[f64], a: &[f64]) -> f64 {
    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let ssq: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
    let numerator: f64 = a
        .iter()
        .enumerate()
        .map(|(i, ai)| ai * (sorted[n - 1 - i] - sorted[i]))
        .sum();
    ((numerator * numerator) / ssq).min(1.0)
}

fn p_value(w: f64, n: usize) -> f64 {
    if n == 3 {
        // Exact distribution for n = 3.
        const PI6: f64 = 6.0 / std::f64::consts::PI;
        const STQR: f64 = std::f64::consts::FRAC_PI_3;
        return (PI6 * (w.sqrt().asin() - STQR)).clamp(0.0, 1.0);
    }

    let an = n as f64;
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let mut y = w1.ln();

    let (m, s) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return 1e-99;
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let xx = an.ln();
        (poly(&C5, xx), poly(&C6, xx).exp())
    };

    standard_normal().sf((y - m) / s).clamp(0.0, 1.0)
}
