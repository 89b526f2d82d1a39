//! Error types for the Punch core library.

use thiserror::Error;

/// Result type alias using the Punch core [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for client operations.
///
/// `SessionExpired` is the only variant that forces
/// re-authentication; callers treat every other variant as a
/// page-local, recoverable failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials are absent, invalid, or were rejected on refresh.
    /// Persisted session state has already been cleared when this
    /// surfaces.
    #[error("Session expired. Please login again.")]
    SessionExpired,

    /// Non-2xx backend response with the best message we could
    /// extract from its body.
    #[error("Request failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// Locally detected invalid input; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// Transport-level failure (connect, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error from the config store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (missing base URL, unusable home dir).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this failure must force the user back to login.
    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}
