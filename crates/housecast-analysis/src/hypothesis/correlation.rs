//! Pearson and Spearman correlation coefficients.

use housecast_core::errors::AnalysisError;

use super::ranks::rank_average;
use crate::descriptive::mean;
use crate::Result;

/// Pearson product-moment correlation. `NaN` when either input is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            test: "correlation",
            required: 2,
            actual: x.len(),
        });
    }

    let mx = mean(x);
    let my = mean(y);
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return Ok(f64::NAN);
    }
    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Spearman rank correlation: Pearson correlation of average ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    let (rx, _) = rank_average(x);
    let (ry, _) = rank_average(y);
    pearson(&rx, &ry)
}
