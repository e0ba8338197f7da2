use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::DocumentId;

/// A rich-text document owned entirely by the client (never synced).
///
/// `content` is serialized editor markup and is stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// File name used when exporting the document as HTML.
    #[must_use]
    pub fn export_file_name(&self) -> String {
        format!("{}.html", self.title)
    }
}
