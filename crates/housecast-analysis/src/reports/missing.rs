//! Missing and zero value counts.

use serde::Serialize;

use crate::table::{Column, Table};

/// Count of flagged entries in one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub column: String,
    pub count: usize,
    /// Share of rows, in percent.
    pub percentage: f64,
}

fn report(table: &Table, count: impl Fn(&Column) -> usize) -> Vec<ValueCount> {
    let rows = table.len();
    table
        .iter()
        .filter_map(|(name, column)| {
            let n = count(column);
            (n > 0).then(|| ValueCount {
                column: name.to_string(),
                count: n,
                percentage: n as f64 / rows as f64 * 100.0,
            })
        })
        .collect()
}

/// Columns with missing entries, in table order. Empty when nothing is missing.
pub fn missing_value_report(table: &Table) -> Vec<ValueCount> {
    report(table, Column::missing_count)
}

/// Numeric columns containing zeros, in table order.
pub fn zero_value_report(table: &Table) -> Vec<ValueCount> {
    report(table, Column::zero_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new()
            .with_numeric("LotFrontage", vec![65.0, f64::NAN, 0.0, 80.0])
            .unwrap()
            .with_numeric("PoolArea", vec![0.0, 0.0, 0.0, 512.0])
            .unwrap()
            .with_categorical("Alley", vec![None, None, Some("Grvl"), None])
            .unwrap()
    }

    #[test]
    fn test_missing_report() {
        let report = missing_value_report(&table());
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].column, "LotFrontage");
        assert_eq!(report[0].count, 1);
        assert!((report[0].percentage - 25.0).abs() < 1e-12);
        assert_eq!(report[1].column, "Alley");
        assert_eq!(report[1].count, 3);
    }

    #[test]
    fn test_zero_report_skips_categorical() {
        let report = zero_value_report(&table());
        assert_eq!(report.len(), 2);
        assert_eq!(report[1].column, "PoolArea");
        assert!((report[1].percentage - 75.0).abs() < 1e-12);
    }

    #[test]
    fn test_clean_table_reports_nothing() {
        let t = Table::new().with_numeric("x", vec![1.0, 2.0]).unwrap();
        assert!(missing_value_report(&t).is_empty());
        assert!(zero_value_report(&t).is_empty());
    }
}
