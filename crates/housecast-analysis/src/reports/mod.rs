//! EDA report builders.
//!
//! Each function returns plain data (counts, bins, test results) for a
//! renderer to draw; nothing here plots or prints.

pub mod bivariate;
pub mod distribution;
pub mod matrix;
pub mod missing;

pub use bivariate::{
    compare_numeric_by_group, compare_numeric_by_group_with_config, contingency_analysis,
    contingency_table, ordinal_analysis, ContingencyAnalysis, ContingencyTable, GroupComparison, GroupMetrics, OrdinalAnalysis,
};
pub use distribution::{
    distribution_plan, distribution_plan_with_config, histogram, sturges_bins, DistributionPlan,
    Histogram,
};
pub use matrix::{rank_test_matrix, spearman_matrix, CorrelationMatrix, PValueMatrix};
pub use missing::{missing_value_report, zero_value_report, ValueCount};
