//! Error types for parsing agenthub values from user input

use thiserror::Error;

/// Errors produced when a user-supplied string does not name a known value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown locale '{0}' (expected 'zh' or 'en')")]
    UnknownLocale(String),

    #[error("Unknown cycle phase '{0}'")]
    UnknownPhase(String),
}
