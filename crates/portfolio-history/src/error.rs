//! Error types for history reconstruction.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Invalid window: start {start} is not before end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid horizons parameter: {0}")]
    InvalidHorizon(String),

    #[error(transparent)]
    Upstream(#[from] polymarket_core::Error),
}

impl HistoryError {
    /// Whether the failure came from an upstream fetch rather than the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(self, HistoryError::Upstream(e) if e.is_upstream())
    }
}

pub type Result<T> = std::result::Result<T, HistoryError>;
