//! Module errors

use thiserror::Error;

use common::SourceError;

use crate::models::config::ConfigError;

/// Represents the different types of errors that can occur while running a sampling session.
#[derive(Debug, Error)]
pub enum SamplerError {
    /// Error indicating that there was an issue building the http client.
    #[error("Failed to build http client: {0}")]
    ClientBuild(String),

    /// Error indicating that a sensor or location source refused the subscription.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Error indicating that the session configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
