use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::WorkspaceId;

/// A named collection of papers owned by the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A workspace together with the paper count derived at fetch time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WorkspaceOverview {
    #[serde(flatten)]
    pub workspace: Workspace,
    pub paper_count: usize,
}

impl WorkspaceOverview {
    /// Sum of paper counts across a collection of overviews.
    #[must_use]
    pub fn total_papers(overviews: &[Self]) -> usize {
        overviews.iter().map(|o| o.paper_count).sum()
    }
}

/// Input for `POST /workspaces`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WorkspaceDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl WorkspaceDraft {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach tags from a comma-separated string (`"nlp, , vision"`).
    #[must_use]
    pub fn with_tag_list(mut self, tags: &str) -> Self {
        self.tags = parse_tags(tags);
        self
    }

    /// A workspace needs a non-blank name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the name is empty or whitespace.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("workspace name must not be empty"));
        }
        Ok(())
    }
}

/// Split a comma-separated tag string, trimming and dropping empties.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
