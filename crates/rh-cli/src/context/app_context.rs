use std::sync::Arc;

use anyhow::Context;
use rh_ai::AiAssistant;
use rh_client::{HttpRemoteStore, Session};
use rh_config::RhConfig;
use rh_local::{DocumentStore, LocalStorage, TokenStore};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: RhConfig,
    pub storage: LocalStorage,
    pub tokens: TokenStore,
    pub session: Session,
    pub client: Arc<HttpRemoteStore>,
}

impl AppContext {
    /// Resolve the persisted token and build the API client around it.
    pub fn init(config: RhConfig) -> anyhow::Result<Self> {
        let storage = LocalStorage::from_config(&config.storage);
        let tokens = TokenStore::new(storage.clone());

        let token = match tokens.load_with_source() {
            Ok(Some((token, source))) => {
                tracing::debug!(source = source.as_str(), "using stored access token");
                Some(token)
            }
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(%error, "stored token unreadable; continuing signed out");
                None
            }
        };

        let session = Session::with_token(token);
        let client = HttpRemoteStore::from_config(&config.api, session.clone())
            .context("failed to build API client")?;

        Ok(Self {
            config,
            storage,
            tokens,
            session,
            client: Arc::new(client),
        })
    }

    pub fn documents(&self) -> anyhow::Result<DocumentStore> {
        DocumentStore::open(self.storage.clone()).context("failed to open local documents")
    }

    #[must_use]
    pub fn assistant(&self) -> AiAssistant<HttpRemoteStore> {
        AiAssistant::new(Arc::clone(&self.client))
    }
}
