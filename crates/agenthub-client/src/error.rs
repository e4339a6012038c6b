//! Error types for backend access

use thiserror::Error;

/// Failure of a single backend request.
///
/// Transport failures, undecodable bodies and remote-reported failures are
/// kept apart here for diagnostics, but every caller in the monitor treats
/// them the same way.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(err) if err.is_timeout())
    }
}

/// Client Result type
pub type ClientResult<T> = std::result::Result<T, ClientError>;
