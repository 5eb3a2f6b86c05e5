//! Housecast statistics engine.
//!
//! - `descriptive`: order statistics, metrics with fences, column summaries
//! - `normality`: Shapiro-Wilk, Kolmogorov-Smirnov, and the size-based checker
//! - `hypothesis`: the comparison and association tests
//! - `selection`: automatic choice between parametric and rank-based tests
//! - `capping`: percentile capping with median substitution
//! - `reports`: inputs for EDA charts, without any rendering

pub mod capping;
pub mod descriptive;
pub mod hypothesis;
pub mod normality;
pub mod ordinal;
pub mod reports;
pub mod selection;
pub mod table;

pub use capping::{apply_capping, cap_column, cap_outliers, CappingReport, PercentileBounds};
pub use descriptive::{compute_metrics, compute_metrics_with_config, DescriptiveMetrics};
pub use hypothesis::{TestKind, TestResult};
pub use normality::{is_normal, NormalityChecker};
pub use ordinal::OrdinalCategories;
pub use selection::{run_comparison, select_and_run_test, Comparison};
pub use table::{Column, Table};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, housecast_core::errors::AnalysisError>;
