//! Session token persistence.
//!
//! Load priority: `RESEARCHHUB_TOKEN` env → `auth_token` key → legacy
//! `token` key. Login writes both keys; logout removes both.

use crate::error::LocalError;
use crate::storage::LocalStorage;

pub const TOKEN_ENV_VAR: &str = "RESEARCHHUB_TOKEN";
pub const TOKEN_KEY: &str = "auth_token";
pub const LEGACY_TOKEN_KEY: &str = "token";

/// Where a loaded token came from (for `auth status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Env,
    Storage,
    LegacyStorage,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::Storage => "storage",
            Self::LegacyStorage => "storage (legacy key)",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenStore {
    storage: LocalStorage,
    env_override: Option<String>,
}

impl TokenStore {
    /// Token store reading the env override from the process environment.
    #[must_use]
    pub fn new(storage: LocalStorage) -> Self {
        let env_override = std::env::var(TOKEN_ENV_VAR).ok();
        Self::with_env_override(storage, env_override)
    }

    /// Token store with an explicit override in place of the env lookup.
    #[must_use]
    pub fn with_env_override(storage: LocalStorage, env_override: Option<String>) -> Self {
        Self {
            storage,
            env_override: env_override.filter(|t| !t.trim().is_empty()),
        }
    }

    /// # Errors
    ///
    /// Returns [`LocalError`] if the storage file can't be read.
    pub fn load(&self) -> Result<Option<String>, LocalError> {
        Ok(self.load_with_source()?.map(|(token, _)| token))
    }

    /// # Errors
    ///
    /// Returns [`LocalError`] if the storage file can't be read.
    pub fn load_with_source(&self) -> Result<Option<(String, TokenSource)>, LocalError> {
        if let Some(token) = &self.env_override {
            return Ok(Some((token.clone(), TokenSource::Env)));
        }
        let stored = |key| -> Result<Option<String>, LocalError> {
            Ok(self
                .storage
                .get_item(key)?
                .filter(|t| !t.trim().is_empty()))
        };
        if let Some(token) = stored(TOKEN_KEY)? {
            return Ok(Some((token, TokenSource::Storage)));
        }
        Ok(stored(LEGACY_TOKEN_KEY)?.map(|t| (t, TokenSource::LegacyStorage)))
    }

    /// # Errors
    ///
    /// Returns [`LocalError`] if the token is blank or can't be written.
    pub fn store(&self, token: &str) -> Result<(), LocalError> {
        if token.trim().is_empty() {
            return Err(LocalError::Validation("refusing to store an empty token".into()));
        }
        self.storage.set_item(TOKEN_KEY, token)?;
        self.storage.set_item(LEGACY_TOKEN_KEY, token)
    }

    /// # Errors
    ///
    /// Returns [`LocalError`] if the storage file can't be written.
    pub fn clear(&self) -> Result<(), LocalError> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(LEGACY_TOKEN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_in(dir: &std::path::Path, env: Option<&str>) -> TokenStore {
        TokenStore::with_env_override(LocalStorage::new(dir), env.map(str::to_string))
    }

    #[test]
    fn store_writes_both_keys() {
        let dir = tempfile::tempdir().unwrap();
        let tokens = store_in(dir.path(), None);
        tokens.store("abc").unwrap();

        let storage = LocalStorage::new(dir.path());
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        assert_eq!(
            storage.get_item(LEGACY_TOKEN_KEY).unwrap().as_deref(),
            Some("abc")
        );
        assert_eq!(
            tokens.load_with_source().unwrap(),
            Some(("abc".to_string(), TokenSource::Storage))
        );
    }

    #[test]
    fn legacy_key_is_a_fallback() {
        let dir = tempfile::tempdir().unwrap();
        LocalStorage::new(dir.path())
            .set_item(LEGACY_TOKEN_KEY, "old")
            .unwrap();
        assert_eq!(
            store_in(dir.path(), None).load_with_source().unwrap(),
            Some(("old".to_string(), TokenSource::LegacyStorage))
        );
    }

    #[test]
    fn env_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let tokens = store_in(dir.path(), Some("from-env"));
        tokens.store("stored").unwrap();
        assert_eq!(tokens.load().unwrap().as_deref(), Some("from-env"));
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(dir.path(), Some("  ")).load().unwrap(), None);
    }

    #[test]
    fn clear_removes_both_keys() {
        let dir = tempfile::tempdir().unwrap();
        let tokens = store_in(dir.path(), None);
        tokens.store("abc").unwrap();
        tokens.clear().unwrap();
        assert_eq!(tokens.load().unwrap(), None);
        assert!(LocalStorage::new(dir.path()).keys().unwrap().is_empty());
    }

    #[test]
    fn empty_token_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(dir.path(), None).store(" ").is_err());
    }
}
