//! Cross-cutting error types for ResearchHub.
//!
//! Domain-specific errors (`ClientError`, `LocalError`, ...) live in their own
//! crates. The binary converges all of them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any ResearchHub crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (required fields, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::Validation`] with a formatted message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
