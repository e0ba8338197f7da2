//! Process-wide bearer token holder.
//!
//! A `Session` is created once at startup (usually from the persisted token)
//! and cloned into every client. Clones share the same slot, so a login or
//! logout through one handle is visible to every outgoing request.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// An anonymous session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A session seeded with a token; blank tokens are treated as absent.
    #[must_use]
    pub fn with_token(token: Option<String>) -> Self {
        let session = Self::new();
        if let Some(token) = token {
            session.set_token(token);
        }
        session
    }

    /// Replace the token (login).
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        let value = if token.trim().is_empty() {
            None
        } else {
            Some(token)
        };
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = value;
    }

    /// Drop the token (logout).
    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Current token, read at request time.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_token() {
        let session = Session::new();
        let clone = session.clone();
        session.set_token("abc");
        assert_eq!(clone.token().as_deref(), Some("abc"));
        clone.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn blank_token_is_absent() {
        let session = Session::with_token(Some("   ".into()));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn debug_does_not_leak_token() {
        let session = Session::with_token(Some("secret-token".into()));
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("authenticated: true"));
    }
}
