//! Outlier capping on tables.

use housecast_analysis::{apply_capping, cap_outliers, PercentileBounds, Table};
use housecast_core::config::AnalysisConfig;
use housecast_core::errors::AnalysisError;

#[test]
fn test_worked_example() {
    let mut table = Table::new()
        .with_numeric("SalePrice", vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0])
        .unwrap();
    let bounds = PercentileBounds::new(0.0, 80.0).unwrap();
    let report = cap_outliers(&mut table, &["SalePrice"], bounds).unwrap();

    assert_eq!(
        table.numeric("SalePrice").unwrap(),
        &[1.0, 2.0, 3.0, 4.0, 5.0, 3.5]
    );
    assert_eq!(report.total_replaced(), 1);
    assert_eq!(report.columns[0].median, 3.5);
    assert_eq!(report.columns[0].upper_value, 5.0);
}

#[test]
fn test_capping_is_idempotent() {
    let mut table = Table::new()
        .with_numeric("LotArea", (0..50).map(|i| (i * i) as f64).collect())
        .unwrap()
        .with_numeric("GrLivArea", (0..50).map(|i| (50 - i) as f64).collect())
        .unwrap();
    let bounds = PercentileBounds::new(5.0, 95.0).unwrap();

    let first = cap_outliers(&mut table, &["LotArea", "GrLivArea"], bounds).unwrap();
    assert!(first.total_replaced() > 0);
    let once = table.clone();
    let second = apply_capping(&mut table, &first).unwrap();

    assert_eq!(table, once);
    assert_eq!(second.total_replaced(), 0);
    assert_eq!(second.columns[0].median, first.columns[0].median);
}

#[test]
fn test_untargeted_columns_untouched() {
    let mut table = Table::new()
        .with_numeric("a", vec![1.0, 2.0, 3.0, 1000.0])
        .unwrap()
        .with_numeric("b", vec![1.0, 2.0, 3.0, 1000.0])
        .unwrap();
    let bounds = PercentileBounds::new(0.0, 50.0).unwrap();
    cap_outliers(&mut table, &["a"], bounds).unwrap();
    assert_eq!(table.numeric("b").unwrap()[3], 1000.0);
    assert_ne!(table.numeric("a").unwrap()[3], 1000.0);
}

#[test]
fn test_unknown_target_leaves_table_unchanged() {
    let mut table = Table::new()
        .with_numeric("a", vec![1.0, 2.0, 3.0, 1000.0])
        .unwrap();
    let before = table.clone();
    let err = cap_outliers(&mut table, &["a", "ghost"], PercentileBounds::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::ColumnNotFound { .. }));
    assert_eq!(table, before);
}

#[test]
fn test_bounds_from_config() {
    let config = AnalysisConfig {
        capping_lower_percentile: Some(1.0),
        capping_upper_percentile: Some(99.0),
        ..Default::default()
    };
    let bounds = PercentileBounds::from_config(&config).unwrap();
    assert_eq!((bounds.lower(), bounds.upper()), (1.0, 99.0));

    let bad = AnalysisConfig {
        capping_lower_percentile: Some(60.0),
        capping_upper_percentile: Some(40.0),
        ..Default::default()
    };
    assert!(PercentileBounds::from_config(&bad).is_err());
}
