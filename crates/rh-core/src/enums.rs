//! Search sources and chat roles.
//!
//! All enums use `snake_case` serialization.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// PaperSource
// ---------------------------------------------------------------------------

/// Upstream index a paper search is routed to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PaperSource {
    #[default]
    All,
    Arxiv,
    Openalex,
    SemanticScholar,
}

impl PaperSource {
    pub const ALL: [Self; 4] = [Self::All, Self::Arxiv, Self::Openalex, Self::SemanticScholar];

    /// Value sent as the `source` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Arxiv => "arxiv",
            Self::Openalex => "openalex",
            Self::SemanticScholar => "semantic_scholar",
        }
    }
}

impl fmt::Display for PaperSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaperSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "arxiv" => Ok(Self::Arxiv),
            "openalex" => Ok(Self::Openalex),
            "semantic_scholar" | "semanticscholar" | "s2" => Ok(Self::SemanticScholar),
            other => Err(CoreError::validation(format!(
                "unknown paper source '{other}' (expected all, arxiv, openalex, semantic_scholar)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ChatRole
// ---------------------------------------------------------------------------

/// Author of a chat transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Ai,
}

impl ChatRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "ai",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
