use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::display;
use crate::errors::CoreError;
use crate::ids::PaperId;

/// An academic paper as returned by search or by a workspace listing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Paper {
    pub id: PaperId,
    pub title: String,
    /// Free-text author list as reported by the source.
    #[serde(default)]
    pub authors: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub citation_count: Option<u64>,
    /// Upstream index (`arXiv`, `OpenAlex`, `Semantic Scholar`).
    #[serde(default)]
    pub source: Option<String>,
}

impl Paper {
    /// Minimal paper with only the required fields set.
    #[must_use]
    pub fn new(id: impl Into<PaperId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors: String::new(),
            abstract_text: None,
            url: None,
            doi: None,
            publication_date: None,
            venue: None,
            citation_count: None,
            source: None,
        }
    }

    #[must_use]
    pub fn author_list(&self) -> Vec<String> {
        display::split_authors(&self.authors)
    }

    /// Short byline (`A et al.`).
    #[must_use]
    pub fn byline(&self) -> String {
        display::format_authors(&self.author_list())
    }

    #[must_use]
    pub fn abstract_or_empty(&self) -> &str {
        self.abstract_text.as_deref().unwrap_or("")
    }
}

/// Body of `POST /workspaces/{id}/papers`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PaperDraft {
    pub paper_id: PaperId,
    pub title: String,
    pub authors: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub url: String,
}

impl PaperDraft {
    /// Draft that imports a search result as-is.
    #[must_use]
    pub fn from_paper(paper: &Paper) -> Self {
        Self {
            paper_id: paper.id.clone(),
            title: paper.title.clone(),
            authors: paper.authors.clone(),
            abstract_text: paper.abstract_text.clone().unwrap_or_default(),
            url: paper.url.clone().unwrap_or_default(),
        }
    }

    /// The paper a successful add is expected to produce.
    #[must_use]
    pub fn to_paper(&self) -> Paper {
        let mut paper = Paper::new(self.paper_id.clone(), self.title.clone());
        paper.authors.clone_from(&self.authors);
        paper.abstract_text = Some(self.abstract_text.clone()).filter(|a| !a.is_empty());
        paper.url = Some(self.url.clone()).filter(|u| !u.is_empty());
        paper
    }

    /// A paper needs a non-blank id to be addressable inside a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the id is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.paper_id.as_str().trim().is_empty() {
            return Err(CoreError::validation("paper id must not be empty"));
        }
        Ok(())
    }
}
