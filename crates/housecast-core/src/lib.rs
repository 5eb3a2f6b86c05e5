//! Core types for Housecast: errors, configuration, tracing, and constants.
//!
//! Every other crate in the workspace depends on this one; it carries no
//! statistics or HTTP logic of its own.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;

pub use config::HousecastConfig;
pub use errors::HousecastErrorCode;
