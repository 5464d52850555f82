//! Error types for the Polymarket Data API boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("API error: {message}")]
    Api { message: String, status: Option<u16> },

    #[error("Unexpected response structure from {endpoint}")]
    UnexpectedShape { endpoint: String },
}

impl Error {
    /// Whether this error means the upstream collaborator could not be
    /// trusted for the call (unreachable, timed out, non-success status, or a
    /// payload in the wrong shape).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Json(_) | Error::Api { .. } | Error::UnexpectedShape { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
