//! Error types for notification delivery and queue operations.

use thiserror::Error;

/// Errors produced by notification components.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Job or request is missing required fields and can never succeed.
    #[error("invalid job: {0}")]
    InvalidJob(String),
    /// Remote delivery failed (transport, status, or malformed body).
    #[error("delivery failed: {0}")]
    Delivery(String),
    /// Remote API answered with a non-success status.
    #[error("remote returned {status}: {body}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
    /// Persistence backend failure with context.
    #[error("storage error: {0}")]
    Storage(String),
    /// Configuration is missing or inconsistent.
    #[error("config error: {0}")]
    Config(String),
    /// A queue pass is already running.
    #[error("queue processing already in flight")]
    ProcessingInFlight,
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        Self::Delivery(err.to_string())
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
