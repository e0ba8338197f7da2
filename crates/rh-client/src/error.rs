//! Remote call error classification.

use thiserror::Error;

/// Errors that can occur when talking to the ResearchHub API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An authenticated call was attempted without a session token.
    #[error("not authenticated; run `rhub auth login`")]
    NotAuthenticated,

    /// The API rejected the credentials or the token (401/403).
    #[error("authentication failed: {message}")]
    Unauthorized {
        /// Server-provided detail.
        message: String,
    },

    /// The addressed resource does not exist (404).
    #[error("not found: {message}")]
    NotFound {
        /// Server-provided detail.
        message: String,
    },

    /// The API returned any other non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `detail` field of the error body, or the raw body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited; retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response body did not match the expected schema.
    #[error("parse error: {0}")]
    Parse(String),

    /// A request or response violated a field constraint.
    #[error("validation error: {0}")]
    Validation(String),

    /// Reading a local file for upload failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// `true` for a 404, which idempotent deletes treat as success.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// `true` for bad credentials, expired tokens, or a missing session.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::NotAuthenticated)
    }
}

impl From<rh_core::CoreError> for ClientError {
    fn from(error: rh_core::CoreError) -> Self {
        Self::Validation(error.to_string())
    }
}
