//! Percentile capping with median substitution.
//!
//! Values strictly outside the `[lower, upper]` percentile values of their
//! column are replaced by the column median. Thresholds and median are
//! snapshotted from the unmodified column before any value changes, and the
//! snapshot is returned so it can be re-applied: re-applying the same
//! thresholds is a no-op. Recomputing percentiles on already-capped data is
//! not, since removing the extremes moves the percentile values inward.

use serde::Serialize;

use housecast_core::config::AnalysisConfig;
use housecast_core::constants::{DEFAULT_CAPPING_LOWER_PERCENTILE, DEFAULT_CAPPING_UPPER_PERCENTILE};
use housecast_core::errors::AnalysisError;

use crate::descriptive::{ensure_finite, median, percentile, sorted_copy};
use crate::table::Table;
use crate::Result;

/// Lower and upper percentiles in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentileBounds {
    lower: f64,
    upper: f64,
}

impl Default for PercentileBounds {
    fn default() -> Self {
        Self {
            lower: DEFAULT_CAPPING_LOWER_PERCENTILE,
            upper: DEFAULT_CAPPING_UPPER_PERCENTILE,
        }
    }
}

impl PercentileBounds {
    /// Fails unless `0 <= lower <= upper <= 100`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        let in_range = |p: f64| (0.0..=100.0).contains(&p);
        if !in_range(lower) || !in_range(upper) || lower > upper {
            return Err(AnalysisError::InvalidArgument(format!(
                "capping percentiles must satisfy 0 <= lower <= upper <= 100, got {lower} and {upper}"
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        let (lower, upper) = config.effective_capping_percentiles();
        Self::new(lower, upper)
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }
}

/// Thresholds used for one column and how many values they replaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnCapping {
    pub column: String,
    pub lower_value: f64,
    pub upper_value: f64,
    pub median: f64,
    pub replaced: usize,
}

impl ColumnCapping {
    fn thresholds(&self) -> Thresholds {
        Thresholds {
            low: self.lower_value,
            high: self.upper_value,
            median: self.median,
        }
    }
}

/// Per-column outcome of [`cap_outliers`], in target order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CappingReport {
    pub columns: Vec<ColumnCapping>,
}

impl CappingReport {
    /// Total number of replaced values.
    pub fn total_replaced(&self) -> usize {
        self.columns.iter().map(|c| c.replaced).sum()
    }
}

#[derive(Debug, Clone, Copy)]
struct Thresholds {
    low: f64,
    high: f64,
    median: f64,
}

impl Thresholds {
    fn compute(values: &[f64], bounds: PercentileBounds) -> Self {
        let sorted = sorted_copy(values);
        Self {
            low: percentile(&sorted, bounds.lower),
            high: percentile(&sorted, bounds.upper),
            median: median(&sorted),
        }
    }

    /// Substitute the median for out-of-range values; returns how many
    /// values changed.
    fn apply(&self, values: &mut [f64]) -> usize {
        let mut replaced = 0;
        for v in values.iter_mut() {
            if (*v < self.low || *v > self.high) && *v != self.median {
                *v = self.median;
                replaced += 1;
            }
        }
        replaced
    }
}

/// Cap a single sample in place; returns the number of replaced values.
pub fn cap_column(values: &mut [f64], bounds: PercentileBounds) -> Result<usize> {
    ensure_finite(values, "capping")?;
    Ok(Thresholds::compute(values, bounds).apply(values))
}

/// Check every target before anything is modified.
fn validate_targets<'a>(table: &Table, targets: impl IntoIterator<Item = &'a str>) -> Result<()> {
    for name in targets {
        let values = table.complete_numeric(name)?;
        if values.is_empty() {
            return Err(AnalysisError::empty(format!("column {name}")));
        }
        ensure_finite(values, name)?;
    }
    Ok(())
}

/// Cap every target column of `table` in place.
///
/// All targets are checked before anything is modified, so an error leaves the
/// table untouched.
pub fn cap_outliers(
    table: &mut Table,
    target_columns: &[&str],
    bounds: PercentileBounds,
) -> Result<CappingReport> {
    validate_targets(table, target_columns.iter().copied())?;

    let mut report = CappingReport::default();
    for &name in target_columns {
        let values = table.numeric_mut(name)?;
        let thresholds = Thresholds::compute(values, bounds);
        let replaced = thresholds.apply(values);
        report.columns.push(record(name, thresholds, replaced));
    }
    Ok(report)
}

/// Re-apply the thresholds of an earlier [`cap_outliers`] run.
///
/// On the table that run produced this replaces nothing.
pub fn apply_capping(table: &mut Table, previous: &CappingReport) -> Result<CappingReport> {
    validate_targets(table, previous.columns.iter().map(|c| c.column.as_str()))?;

    let mut report = CappingReport::default();
    for column in &previous.columns {
        let values = table.numeric_mut(&column.column)?;
        let thresholds = column.thresholds();
        let replaced = thresholds.apply(values);
        report.columns.push(record(&column.column, thresholds, replaced));
    }
    Ok(report)
}

fn record(name: &str, thresholds: Thresholds, replaced: usize) -> ColumnCapping {
    tracing::debug!(
        column = name,
        lower_value = thresholds.low,
        upper_value = thresholds.high,
        median = thresholds.median,
        replaced,
        "capped outliers"
    );
    ColumnCapping {
        column: name.to_string(),
        lower_value: thresholds.low,
        upper_value: thresholds.high,
        median: thresholds.median,
        replaced,
    }
}
