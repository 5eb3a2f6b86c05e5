//! Chi-square test of independence on a contingency table.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use housecast_core::errors::AnalysisError;

use super::types::sanitize_p_value;
use crate::Result;

/// Chi-square statistic, p-value, and degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChiSquareResult {
    pub statistic: f64,
    pub p_value: f64,
    pub dof: usize,
}

/// Pearson chi-square test of independence for `observed[row][col]` counts.
///
/// Yates' continuity correction is applied when there is one degree of
/// freedom. Rows and columns must have positive totals.
pub fn chi_square_independence(observed: &[Vec<f64>]) -> Result<ChiSquareResult> {
    let rows = observed.len();
    if rows == 0 {
        return Err(AnalysisError::empty("contingency table"));
    }
    let cols = observed[0].len();
    if cols == 0 {
        return Err(AnalysisError::empty("contingency table row"));
    }
    if let Some(bad) = observed.iter().find(|r| r.len() != cols) {
        return Err(AnalysisError::LengthMismatch {
            expected: cols,
            actual: bad.len(),
        });
    }

    let row_totals: Vec<f64> = observed.iter().map(|r| r.iter().sum()).collect();
    let col_totals: Vec<f64> = (0..cols)
        .map(|j| observed.iter().map(|r| r[j]).sum())
        .collect();
    let total: f64 = row_totals.iter().sum();
    if row_totals.iter().chain(col_totals.iter()).any(|&t| t <= 0.0) {
        return Err(AnalysisError::InvalidArgument(
            "contingency table has an empty row or column".to_string(),
        ));
    }

    let dof = (rows - 1) * (cols - 1);
    if dof == 0 {
        return Ok(ChiSquareResult {
            statistic: 0.0,
            p_value: 1.0,
            dof,
        });
    }

    let mut statistic = 0.0;
    for (i, row) in observed.iter().enumerate() {
        for (j, &o) in row.iter().enumerate() {
            let e = row_totals[i] * col_totals[j] / total;
            let mut diff = (o - e).abs();
            if dof == 1 {
                diff = (diff - 0.5).max(0.0);
            }
            statistic += diff * diff / e;
        }
    }

    let dist = ChiSquared::new(dof as f64)
        .map_err(|e| AnalysisError::InvalidArgument(format!("chi-squared distribution: {e}")))?;

    Ok(ChiSquareResult {
        statistic,
        p_value: sanitize_p_value(dist.sf(statistic)),
        dof,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_independent_table() {
        let observed = vec![vec![10.0, 20.0], vec![20.0, 40.0]];
        let r = chi_square_independence(&observed).unwrap();
        assert_eq!(r.dof, 1);
        assert!(r.statistic.abs() < 1e-12);
        assert!((r.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_yates_corrected_value() {
        // Expected 25 everywhere, |O - E| = 15 -> (14.5^2 / 25) * 4 = 33.64
        let observed = vec![vec![40.0, 10.0], vec![10.0, 40.0]];
        let r = chi_square_independence(&observed).unwrap();
        assert!((r.statistic - 33.64).abs() < 1e-9);
        assert!(r.p_value < 1e-6);
    }

    #[test]
    fn test_three_by_two_uncorrected() {
        let observed = vec![vec![10.0, 10.0], vec![10.0, 10.0], vec![20.0, 0.0]];
        let r = chi_square_independence(&observed).unwrap();
        assert_eq!(r.dof, 2);
        // Expected (13.33, 6.67) per row: 2.5 + 2.5 + 10 = 15
        assert!((r.statistic - 15.0).abs() < 1e-9, "chi2 = {}", r.statistic);
    }

    #[test]
    fn test_single_row_no_dof() {
        let r = chi_square_independence(&[vec![3.0, 4.0]]).unwrap();
        assert_eq!(r.dof, 0);
        assert_eq!(r.p_value, 1.0);
    }

    #[test]
    fn test_ragged_table_rejected() {
        assert!(chi_square_independence(&[vec![1.0, 2.0], vec![1.0]]).is_err());
    }
}
