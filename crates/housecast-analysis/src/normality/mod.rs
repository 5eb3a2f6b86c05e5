//! Normality testing with size-based test selection.
//!
//! - n ≤ 50 (configurable) → Shapiro-Wilk
//! - n > 50 → one-sample Kolmogorov-Smirnov against N(0, 1)
//!
//! Samples are standardized before testing.

pub mod checker;
pub mod kolmogorov_smirnov;
pub mod shapiro_wilk;

pub use checker::{is_normal, normality_p_value, NormalityChecker, NormalityMethod, NormalityOutcome};
pub use kolmogorov_smirnov::{ks_test_standard_normal, KolmogorovSmirnov};
pub use shapiro_wilk::{shapiro_wilk, ShapiroWilk};
