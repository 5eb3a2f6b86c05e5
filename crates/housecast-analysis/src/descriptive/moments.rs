//! Moment-based statistics.
//!
//! Conventions follow the usual dataframe defaults: `variance` and `std_dev`
//! use `n - 1`, `skewness` is the adjusted Fisher-Pearson coefficient, and
//! `kurtosis` is the bias-corrected excess kurtosis. `standardize` uses the
//! population standard deviation.

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (`n - 1` denominator). `NaN` when fewer than 2 values.
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Sample standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Central moments m2, m3, m4 with `n` denominators.
fn central_moments(values: &[f64]) -> (f64, f64, f64) {
    let n = values.len() as f64;
    let m = mean(values);
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for v in values {
        let d = v - m;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    (m2 / n, m3 / n, m4 / n)
}

/// Adjusted Fisher-Pearson skewness `G1`. `NaN` when n < 3; 0 for constant data.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return f64::NAN;
    }
    let (m2, m3, _) = central_moments(values);
    if m2 <= 0.0 {
        return 0.0;
    }
    let g1 = m3 / m2.powf(1.5);
    let n = n as f64;
    g1 * (n * (n - 1.0)).sqrt() / (n - 2.0)
}

/// Bias-corrected excess kurtosis `G2`. `NaN` when n < 4; 0 for constant data.
pub fn kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return f64::NAN;
    }
    let (m2, _, m4) = central_moments(values);
    if m2 <= 0.0 {
        return 0.0;
    }
    let g2 = m4 / (m2 * m2) - 3.0;
    let n = n as f64;
    ((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0))
}

/// Z-scores using the population standard deviation.
///
/// Returns `None` when the values are empty or have zero variance.
pub fn standardize(values: &[f64]) -> Option<Vec<f64>> {
    if values.is_empty() {
        return None;
    }
    let m = mean(values);
    let n = values.len() as f64;
    let sd = (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n).sqrt();
    if sd <= 0.0 || !sd.is_finite() {
        return None;
    }
    Some(values.iter().map(|v| (v - m) / sd).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&values) - 5.0).abs() < 1e-12);
        assert!((variance(&values) - 32.0 / 7.0).abs() < 1e-12);
        assert!((std_dev(&values) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_skewness_symmetric_is_zero() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(skewness(&values).abs() < 1e-12);
    }

    #[test]
    fn test_skewness_right_tail_positive() {
        let values = [1.0, 1.0, 2.0, 2.0, 3.0, 20.0];
        assert!(skewness(&values) > 1.0);
    }

    #[test]
    fn test_kurtosis_known_value() {
        // Excess kurtosis of 1..=5 with bias correction is -1.2.
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((kurtosis(&values) + 1.2).abs() < 1e-10);
    }

    #[test]
    fn test_standardize_zero_variance() {
        assert!(standardize(&[3.0, 3.0, 3.0]).is_none());
        let z = standardize(&[1.0, 3.0]).unwrap();
        assert!((z[0] + 1.0).abs() < 1e-12);
        assert!((z[1] - 1.0).abs() < 1e-12);
    }
}
