use thiserror::Error;

/// Errors raised by a push source when subscribing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SourceError {
    #[error("Sensor unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid subscription options: {0}")]
    InvalidOptions(String),
}
