//! Error types for the session crate.

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors that can occur while reading or writing session state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Backing file could not be read or written
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file holds something other than a string map
    #[error("Session store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A lock was poisoned by a panicking writer
    #[error("Session store lock poisoned")]
    Poisoned,

    /// Refused to persist an empty identifier
    #[error("Cannot sign in {0} with an empty identifier")]
    EmptyIdentifier(String),
}

impl From<SessionError> for eventmart_core::Error {
    fn from(err: SessionError) -> Self {
        let code = match err {
            SessionError::EmptyIdentifier(_) => eventmart_core::ErrorCode::InvalidInput,
            _ => eventmart_core::ErrorCode::SessionStoreUnavailable,
        };
        eventmart_core::Error::new(code, err.to_string()).with_source(err)
    }
}
