//! Prediction service configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HOST, DEFAULT_MODEL_PATH, DEFAULT_PORT};

/// Configuration for the HTTP prediction service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServeConfig {
    /// Bind host. Default: 127.0.0.1.
    pub host: Option<String>,
    /// Bind port. Default: 5000.
    pub port: Option<u16>,
    /// Path of the serialized model artifact. Default: models/model.json.
    pub model_path: Option<String>,
}

impl ServeConfig {
    pub fn effective_host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn effective_model_path(&self) -> PathBuf {
        PathBuf::from(self.model_path.as_deref().unwrap_or(DEFAULT_MODEL_PATH))
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.effective_host(), self.effective_port())
    }
}
