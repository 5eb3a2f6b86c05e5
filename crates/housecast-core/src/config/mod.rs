//! Configuration system for Housecast.
//! TOML-based, 3-layer resolution: CLI > env > project file > defaults.

pub mod analysis_config;
pub mod housecast_config;
pub mod serve_config;

pub use analysis_config::AnalysisConfig;
pub use housecast_config::{CliOverrides, HousecastConfig};
pub use serve_config::ServeConfig;
