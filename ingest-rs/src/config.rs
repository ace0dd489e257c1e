use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub bind: String,
    /// Append-only NDJSON log receiving every record
    pub log_path: PathBuf,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            log_path: default_log_path(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_log_path() -> PathBuf {
    PathBuf::from("sensor_data_log.ndjson")
}

impl IngestConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: IngestConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
