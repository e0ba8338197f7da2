//! Client-local storage location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the local key-value store. Empty means the
    /// platform data directory (`~/.local/share/researchhub` on Linux).
    #[serde(default)]
    pub data_dir: String,
}

impl StorageConfig {
    /// Resolve the effective data directory.
    ///
    /// Falls back to `./.researchhub` when the platform has no data dir.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        if !self.data_dir.trim().is_empty() {
            return PathBuf::from(self.data_dir.trim());
        }
        dirs::data_dir().map_or_else(
            || PathBuf::from(".researchhub"),
            |dir| dir.join("researchhub"),
        )
    }
}
