use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use common::constants::INGEST_PATH;
use common::LocationPolicy;

use crate::constants::{
    DEFAULT_ENDPOINT, DEFAULT_SEND_TIMEOUT_MS, DEFAULT_SENSOR_INTERVAL_MS,
    DEFAULT_TRANSMIT_INTERVAL_MS, MIN_SENSOR_INTERVAL_MS, MIN_TRANSMIT_INTERVAL_MS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings of a sampling session.
///
/// Every field is optional in the JSON form, missing ones take the defaults below.
///
/// ```json
/// {
///   "sensor_interval_ms": 1000,
///   "location": {"accuracy": "best_for_navigation", "time_interval_ms": 1000, "distance_interval_m": 1.0},
///   "transmit_interval_ms": 1000,
///   "endpoint": "http://127.0.0.1:3000",
///   "send_timeout_ms": 5000
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Update interval requested from the accelerometer and the gyroscope
    pub sensor_interval_ms: u64,
    pub location: LocationPolicy,
    /// Period of the transmission timer
    pub transmit_interval_ms: u64,
    /// Base url of the ingestion service. Records are posted to `<endpoint>/sensordata`
    pub endpoint: String,
    pub send_timeout_ms: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sensor_interval_ms: DEFAULT_SENSOR_INTERVAL_MS,
            location: LocationPolicy::default(),
            transmit_interval_ms: DEFAULT_TRANSMIT_INTERVAL_MS,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            send_timeout_ms: DEFAULT_SEND_TIMEOUT_MS,
        }
    }
}

impl SamplerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: SamplerConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Convenience constructor pointing to a given ingestion endpoint
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor_interval_ms < MIN_SENSOR_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "sensor_interval_ms needs to be at least {MIN_SENSOR_INTERVAL_MS}"
            )));
        }
        if self.transmit_interval_ms < MIN_TRANSMIT_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "transmit_interval_ms needs to be at least {MIN_TRANSMIT_INTERVAL_MS}"
            )));
        }
        if self.send_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "send_timeout_ms needs to be positive".to_string(),
            ));
        }
        if self.location.distance_interval_m < 0.0 {
            return Err(ConfigError::Invalid(
                "location.distance_interval_m can't be negative".to_string(),
            ));
        }
        reqwest::Url::parse(&self.endpoint)
            .map_err(|e| ConfigError::Invalid(format!("endpoint {}: {}", self.endpoint, e)))?;
        Ok(())
    }

    /// Full url records are posted to
    pub fn ingest_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), INGEST_PATH)
    }

    pub fn sensor_interval(&self) -> Duration {
        Duration::from_millis(self.sensor_interval_ms)
    }

    pub fn transmit_interval(&self) -> Duration {
        Duration::from_millis(self.transmit_interval_ms)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}
