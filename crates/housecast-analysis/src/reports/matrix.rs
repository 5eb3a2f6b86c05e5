//! Pairwise association matrices.

use rayon::prelude::*;
use serde::Serialize;

use crate::hypothesis::{kruskal_wallis, mann_whitney_u, spearman};
use crate::selection::split_by_group;
use crate::table::Table;
use crate::Result;

/// Symmetric Spearman correlation matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// P-values with quantitative variables as rows and qualitative ones as
/// columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PValueMatrix {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// Spearman correlation for every pair of `columns`. Columns must be complete.
pub fn spearman_matrix(table: &Table, columns: &[&str]) -> Result<CorrelationMatrix> {
    let data: Vec<&[f64]> = columns
        .iter()
        .map(|&name| table.complete_numeric(name))
        .collect::<Result<_>>()?;

    let values = (0..data.len())
        .into_par_iter()
        .map(|i| {
            (0..data.len())
                .map(|j| {
                    if i == j {
                        Ok(1.0)
                    } else {
                        spearman(data[i], data[j])
                    }
                })
                .collect::<Result<Vec<f64>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorrelationMatrix {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        values,
    })
}

/// Mann-Whitney (two groups) or Kruskal-Wallis p-value for every
/// quantitative/qualitative pair. A qualitative column with a single group
/// yields `1.0`.
pub fn rank_test_matrix(
    table: &Table,
    quantitative: &[&str],
    qualitative: &[&str],
) -> Result<PValueMatrix> {
    let numeric: Vec<&[f64]> = quantitative
        .iter()
        .map(|&name| table.complete_numeric(name))
        .collect::<Result<_>>()?;
    let labels: Vec<Vec<&str>> = qualitative
        .iter()
        .map(|&name| table.complete_labels(name))
        .collect::<Result<_>>()?;

    let values = numeric
        .par_iter()
        .map(|values| {
            labels
                .iter()
                .map(|grouping| rank_test_p_value(grouping, values))
                .collect::<Result<Vec<f64>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PValueMatrix {
        rows: quantitative.iter().map(|c| c.to_string()).collect(),
        columns: qualitative.iter().map(|c| c.to_string()).collect(),
        values,
    })
}

fn rank_test_p_value(grouping: &[&str], values: &[f64]) -> Result<f64> {
    let groups = split_by_group(grouping, values)?;
    let slices: Vec<&[f64]> = groups.iter().map(Vec::as_slice).collect();
    let outcome = match slices.as_slice() {
        [] | [_] => return Ok(1.0),
        [a, b] => mann_whitney_u(a, b)?,
        _ => kruskal_wallis(&slices)?,
    };
    Ok(outcome.p_value)
}
