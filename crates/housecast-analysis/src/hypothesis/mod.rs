//! Hypothesis tests used by the test selector and the EDA reports.
//!
//! Distribution tails come from `statrs`. Every p-value leaving this module
//! is finite and in `[0, 1]`; undefined statistics (all values tied, zero
//! pooled variance with equal means) report `1.0`.

pub mod anova;
pub mod chi_square;
pub mod correlation;
pub mod kruskal;
pub mod mann_whitney;
pub mod ranks;
pub mod ttest;
pub mod types;

pub use anova::one_way_anova;
pub use chi_square::{chi_square_independence, ChiSquareResult};
pub use correlation::{pearson, spearman};
pub use kruskal::kruskal_wallis;
pub use mann_whitney::mann_whitney_u;
pub use ranks::rank_average;
pub use ttest::student_t_test;
pub use types::{sanitize_p_value, TestKind, TestOutcome, TestResult};
