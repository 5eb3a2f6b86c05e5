//! Automatic choice between parametric and rank-based comparison tests.

pub mod grouping;
pub mod selector;

pub use grouping::{group_indices, split_by_group};
pub use selector::{run_comparison, select_and_run_test, Comparison, TestSelector};
