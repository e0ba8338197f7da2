use std::path::PathBuf;

use rh_core::DocumentId;

#[derive(Debug, thiserror::Error)]
pub enum LocalError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt local storage value for '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document {0} not found")]
    DocumentNotFound(DocumentId),

    #[error("validation error: {0}")]
    Validation(String),
}

impl LocalError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
