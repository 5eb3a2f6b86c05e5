//! Per-column summaries for continuous variables.

use rayon::prelude::*;
use serde::Serialize;

use super::ensure_finite;
use super::moments::{kurtosis, skewness, standardize, std_dev, variance};
use super::quantile::sorted_copy;
use crate::normality::ks_test_standard_normal;
use crate::table::Table;
use crate::Result;

/// Shape statistics for one continuous column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinuousSummary {
    pub column: String,
    /// Observations used (missing entries excluded).
    pub count: usize,
    pub unique: usize,
    pub std_dev: f64,
    pub variance: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    /// KS p-value of the standardized values against N(0, 1); `None` for
    /// constant columns.
    pub normality_p_value: Option<f64>,
}

/// Summarize one sample. Fails on empty or non-finite input.
pub fn summarize(column: &str, values: &[f64]) -> Result<ContinuousSummary> {
    ensure_finite(values, column)?;

    let mut sorted = sorted_copy(values);
    sorted.dedup();

    let normality_p_value = match standardize(values) {
        Some(z) => Some(ks_test_standard_normal(&z)?.p_value),
        None => None,
    };

    Ok(ContinuousSummary {
        column: column.to_string(),
        count: values.len(),
        unique: sorted.len(),
        std_dev: std_dev(values),
        variance: variance(values),
        skewness: skewness(values),
        kurtosis: kurtosis(values),
        normality_p_value,
    })
}

/// Summaries for `columns`, in the given order. Missing (`NaN`) entries are
/// dropped per column.
pub fn describe_continuous(table: &Table, columns: &[&str]) -> Result<Vec<ContinuousSummary>> {
    let present: Vec<(&str, Vec<f64>)> = columns
        .iter()
        .map(|&name| {
            let values = table.numeric(name)?;
            Ok((name, values.iter().copied().filter(|v| !v.is_nan()).collect()))
        })
        .collect::<Result<_>>()?;

    present
        .par_iter()
        .map(|(name, values)| summarize(name, values))
        .collect()
}
