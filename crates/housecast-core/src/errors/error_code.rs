//! HousecastErrorCode trait for boundary conversion.

/// Structured error code for every Housecast error enum.
///
/// Codes are coarse categories: several variants may share one code, and the
/// HTTP layer maps codes rather than individual variants.
pub trait HousecastErrorCode {
    /// Returns the error code string (e.g., "INVALID_ARGUMENT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted log string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const INSUFFICIENT_DATA: &str = "INSUFFICIENT_DATA";
pub const EMPTY_INPUT: &str = "EMPTY_INPUT";
pub const COLUMN_NOT_FOUND: &str = "COLUMN_NOT_FOUND";
pub const INVALID_DATA: &str = "INVALID_DATA";
pub const NO_INPUT: &str = "NO_INPUT";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const MODEL_UNAVAILABLE: &str = "MODEL_UNAVAILABLE";
pub const INFERENCE_ERROR: &str = "INFERENCE_ERROR";
pub const MODEL_LOAD_ERROR: &str = "MODEL_LOAD_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
