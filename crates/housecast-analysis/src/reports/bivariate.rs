//! Two-variable analyses: contingency tables and grouped comparisons.

use rustc_hash::FxHashMap;
use serde::Serialize;

use housecast_core::config::AnalysisConfig;
use housecast_core::errors::AnalysisError;

use crate::descriptive::{compute_metrics_with_config, DescriptiveMetrics};
use crate::hypothesis::{chi_square_independence, ChiSquareResult, TestResult};
use crate::ordinal::OrdinalCategories;
use crate::selection::{group_indices, run_comparison, Comparison, TestSelector};
use crate::Result;

/// Cross-tabulated counts, `counts[row][column]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContingencyTable {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub counts: Vec<Vec<f64>>,
}

impl ContingencyTable {
    /// Each row divided by its total.
    pub fn row_relative(&self) -> Vec<Vec<f64>> {
        self.counts
            .iter()
            .map(|row| {
                let total: f64 = row.iter().sum();
                row.iter()
                    .map(|&c| if total > 0.0 { c / total } else { 0.0 })
                    .collect()
            })
            .collect()
    }
}

fn sorted_labels<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut labels: Vec<String> = values.iter().map(|v| v.as_ref().to_string()).collect();
    labels.sort();
    labels.dedup();
    labels
}

fn tabulate<S: AsRef<str>>(
    rows: &[S],
    columns: &[S],
    row_labels: Vec<String>,
    column_labels: Vec<String>,
) -> Result<ContingencyTable> {
    if rows.len() != columns.len() {
        return Err(AnalysisError::LengthMismatch {
            expected: rows.len(),
            actual: columns.len(),
        });
    }
    if rows.is_empty() {
        return Err(AnalysisError::empty("contingency table"));
    }

    let row_idx: FxHashMap<&str, usize> = row_labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();
    let col_idx: FxHashMap<&str, usize> = column_labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();

    let mut counts = vec![vec![0.0; column_labels.len()]; row_labels.len()];
    for (r, c) in rows.iter().zip(columns) {
        let (Some(&i), Some(&j)) = (row_idx.get(r.as_ref()), col_idx.get(c.as_ref())) else {
            continue;
        };
        counts[i][j] += 1.0;
    }

    Ok(ContingencyTable {
        row_labels,
        column_labels,
        counts,
    })
}

/// Cross-tabulate `independent` (rows) against `target` (columns), labels
/// sorted.
pub fn contingency_table<S: AsRef<str>>(independent: &[S], target: &[S]) -> Result<ContingencyTable> {
    tabulate(independent, target, sorted_labels(independent), sorted_labels(target))
}

/// Contingency table of a nominal variable against a qualitative target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContingencyAnalysis {
    pub table: ContingencyTable,
    pub row_relative: Vec<Vec<f64>>,
    pub chi_square: ChiSquareResult,
}

pub fn contingency_analysis<S: AsRef<str>>(
    independent: &[S],
    target: &[S],
) -> Result<ContingencyAnalysis> {
    let table = contingency_table(independent, target)?;
    let chi_square = chi_square_independence(&table.counts)?;
    Ok(ContingencyAnalysis {
        row_relative: table.row_relative(),
        table,
        chi_square,
    })
}

/// Contingency table of an ordinal variable, rows in category order, with the
/// rank test of the encoded values across target groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrdinalAnalysis {
    pub table: ContingencyTable,
    pub row_relative: Vec<Vec<f64>>,
    pub test: TestResult,
}

pub fn ordinal_analysis<S: AsRef<str>>(
    target: &[S],
    variable: &str,
    ordinal: &[S],
    categories: &OrdinalCategories,
) -> Result<OrdinalAnalysis> {
    let codes = categories.encode(variable, ordinal)?;
    let target_labels: Vec<&str> = target.iter().map(AsRef::as_ref).collect();
    let test = run_comparison(&target_labels, Comparison::Ordinal(&codes))?;

    let row_labels: Vec<String> = categories
        .categories(variable)
        .map(<[String]>::to_vec)
        .unwrap_or_default();
    let table = tabulate(ordinal, target, row_labels, sorted_labels(target))?;

    Ok(OrdinalAnalysis {
        row_relative: table.row_relative(),
        table,
        test,
    })
}

/// Metrics of one group of a numeric variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMetrics {
    pub label: String,
    pub metrics: DescriptiveMetrics,
}

/// Per-group metrics (boxplot input) and the selected comparison test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparison {
    pub groups: Vec<GroupMetrics>,
    pub test: TestResult,
}

/// Compare a numeric variable across the groups of a qualitative one.
/// Groups appear in order of first appearance.
pub fn compare_numeric_by_group<S: AsRef<str>>(
    grouping: &[S],
    values: &[f64],
) -> Result<GroupComparison> {
    compare_numeric_by_group_with_config(grouping, values, &AnalysisConfig::default())
}

/// [`compare_numeric_by_group`] with the configured alpha, Shapiro-Wilk
/// ceiling and fence multiplier.
pub fn compare_numeric_by_group_with_config<S: AsRef<str>>(
    grouping: &[S],
    values: &[f64],
    config: &AnalysisConfig,
) -> Result<GroupComparison> {
    let labels: Vec<&str> = grouping.iter().map(AsRef::as_ref).collect();
    let test = TestSelector::from_config(config).run(&labels, Comparison::Numeric(values))?;

    let groups = group_indices(&labels)
        .into_iter()
        .map(|rows| {
            let sample: Vec<f64> = rows.iter().map(|&r| values[r]).collect();
            Ok(GroupMetrics {
                label: labels[rows[0]].to_string(),
                metrics: compute_metrics_with_config(&sample, config)?,
            })
        })
        .collect::<Result<_>>()?;

    Ok(GroupComparison { groups, test })
}
