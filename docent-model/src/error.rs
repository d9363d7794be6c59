//! Error types for the `docent-model` crate.

use thiserror::Error;

/// Errors that can occur when calling the generation service.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The credential is missing, empty, or was rejected by the service.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Connection, DNS, TLS, or timeout failure below the HTTP layer.
    /// Timeout expiry of the configured request deadline lands here.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status, or a success status
    /// with a body that could not be used.
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        /// The HTTP status code, or 200 for an unusable success body.
        status: u16,
        /// A description of the failure, from the error body when available.
        message: String,
    },
}

impl ModelError {
    /// Whether a retry under a non-zero [`RetryPolicy`](crate::RetryPolicy)
    /// is worthwhile: rate limiting and transient transport failures are,
    /// credential and other upstream rejections are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { status, .. } => *status == 429,
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Auth(_) => false,
        }
    }
}

/// A convenience result type for generation operations.
pub type Result<T> = std::result::Result<T, ModelError>;
