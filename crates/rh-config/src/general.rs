//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default search result limit.
const fn default_limit() -> u32 {
    10
}

fn default_source() -> String {
    "all".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default search source (`all`, `arxiv`, `openalex`, `semantic_scholar`).
    #[serde(default = "default_source")]
    pub default_source: String,

    /// Default result limit for search commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_source: default_source(),
            default_limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_source, "all");
        assert_eq!(config.default_limit, 10);
    }
}
