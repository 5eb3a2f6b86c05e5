//! Shared constants for the Housecast engine and service.

/// Housecast version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default significance level for normality checks.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Largest sample size checked with Shapiro-Wilk; larger samples use Kolmogorov-Smirnov.
pub const DEFAULT_SHAPIRO_MAX_N: usize = 50;

/// Smallest sample a normality test accepts.
pub const MIN_NORMALITY_SAMPLE: usize = 3;

/// Largest sample the Shapiro-Wilk approximation supports.
pub const MAX_SHAPIRO_SAMPLE: usize = 5000;

/// Tukey fence multiplier applied to the interquartile range.
pub const DEFAULT_FENCE_MULTIPLIER: f64 = 1.5;

/// Default lower percentile for outlier capping.
pub const DEFAULT_CAPPING_LOWER_PERCENTILE: f64 = 0.0;

/// Default upper percentile for outlier capping.
pub const DEFAULT_CAPPING_UPPER_PERCENTILE: f64 = 99.5;

/// Default bind host for the prediction service.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port for the prediction service.
pub const DEFAULT_PORT: u16 = 5000;

/// Default location of the serialized model artifact.
pub const DEFAULT_MODEL_PATH: &str = "models/model.json";

/// Project config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "housecast.toml";

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV_VAR: &str = "HOUSECAST_LOG";
