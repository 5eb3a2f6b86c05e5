//! Error handling for Housecast.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod config_error;
pub mod error_code;
pub mod model_error;
pub mod prediction_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use error_code::HousecastErrorCode;
pub use model_error::ModelError;
pub use prediction_error::PredictionError;
