//! Top-level Housecast configuration with 3-layer resolution.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, ServeConfig};
use crate::constants::{CONFIG_FILE_NAME, MAX_SHAPIRO_SAMPLE, MIN_NORMALITY_SAMPLE};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`HOUSECAST_*`)
/// 3. Project config (`housecast.toml` in the working directory, or `--config`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HousecastConfig {
    pub analysis: AnalysisConfig,
    pub serve: ServeConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model_path: Option<String>,
}

impl HousecastConfig {
    /// Load configuration with 3-layer resolution.
    ///
    /// `root` is searched for `housecast.toml` unless `explicit_file` is
    /// given, in which case that file must exist.
    pub fn load(
        root: &Path,
        explicit_file: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: project config
        match explicit_file {
            Some(path) => Self::merge_toml_file(&mut config, path)?,
            None => {
                let project_config_path = root.join(CONFIG_FILE_NAME);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &HousecastConfig) -> Result<(), ConfigError> {
        if let Some(alpha) = config.analysis.alpha {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.alpha".to_string(),
                    message: "must be strictly between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(max_n) = config.analysis.shapiro_max_n {
            if !(MIN_NORMALITY_SAMPLE..=MAX_SHAPIRO_SAMPLE).contains(&max_n) {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.shapiro_max_n".to_string(),
                    message: format!(
                        "must be between {MIN_NORMALITY_SAMPLE} and {MAX_SHAPIRO_SAMPLE}"
                    ),
                });
            }
        }
        if let Some(multiplier) = config.analysis.fence_multiplier {
            if !(multiplier > 0.0 && multiplier.is_finite()) {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.fence_multiplier".to_string(),
                    message: "must be a positive number".to_string(),
                });
            }
        }
        let (lower, upper) = config.analysis.effective_capping_percentiles();
        for (field, value) in [
            ("analysis.capping_lower_percentile", lower),
            ("analysis.capping_upper_percentile", upper),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be between 0 and 100".to_string(),
                });
            }
        }
        if lower > upper {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.capping_lower_percentile".to_string(),
                message: "must not exceed capping_upper_percentile".to_string(),
            });
        }
        if config.serve.port == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "serve.port".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut HousecastConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: HousecastConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        tracing::debug!(path = %path.display(), "merged config file");
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut HousecastConfig, other: &HousecastConfig) {
        // Analysis
        if other.analysis.alpha.is_some() {
            base.analysis.alpha = other.analysis.alpha;
        }
        if other.analysis.shapiro_max_n.is_some() {
            base.analysis.shapiro_max_n = other.analysis.shapiro_max_n;
        }
        if other.analysis.fence_multiplier.is_some() {
            base.analysis.fence_multiplier = other.analysis.fence_multiplier;
        }
        if other.analysis.capping_lower_percentile.is_some() {
            base.analysis.capping_lower_percentile = other.analysis.capping_lower_percentile;
        }
        if other.analysis.capping_upper_percentile.is_some() {
            base.analysis.capping_upper_percentile = other.analysis.capping_upper_percentile;
        }

        // Serve
        if other.serve.host.is_some() {
            base.serve.host = other.serve.host.clone();
        }
        if other.serve.port.is_some() {
            base.serve.port = other.serve.port;
        }
        if other.serve.model_path.is_some() {
            base.serve.model_path = other.serve.model_path.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `HOUSECAST_ANALYSIS_ALPHA`, `HOUSECAST_SERVE_PORT`, etc.
    /// Unparseable values are logged and ignored.
    fn apply_env_overrides(config: &mut HousecastConfig) {
        if let Some(v) = env_value("HOUSECAST_ANALYSIS_ALPHA") {
            config.analysis.alpha = Some(v);
        }
        if let Some(v) = env_value("HOUSECAST_ANALYSIS_SHAPIRO_MAX_N") {
            config.analysis.shapiro_max_n = Some(v);
        }
        if let Some(v) = env_value("HOUSECAST_ANALYSIS_FENCE_MULTIPLIER") {
            config.analysis.fence_multiplier = Some(v);
        }
        if let Ok(val) = std::env::var("HOUSECAST_SERVE_HOST") {
            config.serve.host = Some(val);
        }
        if let Some(v) = env_value("HOUSECAST_SERVE_PORT") {
            config.serve.port = Some(v);
        }
        if let Ok(val) = std::env::var("HOUSECAST_MODEL_PATH") {
            config.serve.model_path = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut HousecastConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.host {
            config.serve.host = Some(v.clone());
        }
        if let Some(v) = cli.port {
            config.serve.port = Some(v);
        }
        if let Some(ref v) = cli.model_path {
            config.serve.model_path = Some(v.clone());
        }
    }
}

/// Read and parse `key` from the environment.
fn env_value<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    parse_env_value(key, &raw)
}

fn parse_env_value<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = raw, "ignoring unparseable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_value() {
        assert_eq!(parse_env_value::<u16>("HOUSECAST_SERVE_PORT", "8080"), Some(8080));
        assert_eq!(parse_env_value::<u16>("HOUSECAST_SERVE_PORT", " 8080 "), Some(8080));
        assert_eq!(parse_env_value::<u16>("HOUSECAST_SERVE_PORT", "not-a-port"), None);
        assert_eq!(parse_env_value::<f64>("HOUSECAST_ANALYSIS_ALPHA", "0.1"), Some(0.1));
        assert_eq!(parse_env_value::<f64>("HOUSECAST_ANALYSIS_ALPHA", ""), None);
    }
}
