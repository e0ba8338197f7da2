use anyhow::Context;
use rh_config::RhConfig;

/// Load `.env`, then the layered configuration.
pub fn load_config() -> anyhow::Result<RhConfig> {
    let config = RhConfig::load_with_dotenv().context("failed to load configuration")?;
    tracing::debug!(
        base_url = config.api.normalized_base_url(),
        data_dir = %config.storage.resolved_data_dir().display(),
        "configuration loaded"
    );
    Ok(config)
}
