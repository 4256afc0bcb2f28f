//! Error types for the panel host.

use thiserror::Error;

/// Errors that can occur while polling sensors or driving the display.
///
/// Sensor lookups never produce these: a missing or mistyped field resolves
/// to a default reading instead. Only I/O and configuration surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The sensor endpoint returned an error status code
    #[error("sensor endpoint returned error status {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Sensor document is not valid JSON
    #[error("JSON parse error: {0}")]
    Serialization(String),

    /// Configuration file missing or invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Serial link failed or was closed
    #[error("serial link error: {0}")]
    Serial(String),
}

#[cfg(feature = "host")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Request(err.to_string())
    }
}

#[cfg(feature = "host")]
impl From<serialport::Error> for Error {
    fn from(err: serialport::Error) -> Self {
        Error::Serial(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
