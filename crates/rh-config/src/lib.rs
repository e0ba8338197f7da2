//! # rh-config
//!
//! Layered configuration loading for ResearchHub using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RESEARCHHUB_*` prefix, `__` as separator)
//! 2. Project-level `.researchhub/config.toml`
//! 3. User-level `~/.config/researchhub/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RESEARCHHUB_API__BASE_URL` -> `api.base_url`,
//! `RESEARCHHUB_STORAGE__DATA_DIR` -> `storage.data_dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use rh_config::RhConfig;
//!
//! let config = RhConfig::load_with_dotenv().expect("config");
//! println!("API: {}", config.api.normalized_base_url());
//! ```

mod api;
mod error;
mod general;
mod storage;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Search sources the API understands.
const KNOWN_SOURCES: [&str; 4] = ["all", "arxiv", "openalex", "semantic_scholar"];

/// Largest page the search endpoint accepts.
pub const MAX_SEARCH_LIMIT: u32 = 50;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RhConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RhConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env`
    /// file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".researchhub/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("RESEARCHHUB_").split("__"))
    }

    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;

        if !KNOWN_SOURCES.contains(&self.general.default_source.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.default_source".into(),
                reason: format!(
                    "'{}' is not one of {}",
                    self.general.default_source,
                    KNOWN_SOURCES.join(", ")
                ),
            });
        }

        if !(1..=MAX_SEARCH_LIMIT).contains(&self.general.default_limit) {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: format!("must be between 1 and {MAX_SEARCH_LIMIT}"),
            });
        }

        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("researchhub").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RhConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.default_limit, 10);
    }

    #[test]
    fn unknown_source_is_rejected() {
        let mut config = RhConfig::default();
        config.general.default_source = "pubmed".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.default_source"));
    }

    #[test]
    fn limit_above_server_cap_is_rejected() {
        let mut config = RhConfig::default();
        config.general.default_limit = 51;
        assert!(config.validate().is_err());
    }
}
