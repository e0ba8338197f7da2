//! Typed wire schemas for API payloads.
//!
//! The server is loose about shapes: workspace ids arrive as integers, paper
//! authors as a string or a list, citation counts under two names, paper
//! lists bare or wrapped in `{"papers": [...]}`. Everything is normalized
//! here so only well-formed `rh_core` entities leave the client.

use chrono::{DateTime, NaiveDateTime, Utc};
use rh_core::entities::{Paper, PaperDraft, User, Workspace};
use rh_core::{PaperId, WorkspaceId};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

/// Title given to papers the server returns without one.
pub const UNTITLED_PAPER: &str = "Untitled";

/// An id that may be sent as a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Int(i64),
    Text(String),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

/// Authors as free text or as a list of names.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireAuthors {
    Text(String),
    List(Vec<String>),
}

impl WireAuthors {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text.trim().to_string(),
            Self::List(names) => names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePaper {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub paper_id: Option<WireId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Option<WireAuthors>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub citation_count: Option<u64>,
    #[serde(default, rename = "citationCount")]
    pub citation_count_camel: Option<u64>,
    #[serde(default)]
    pub source: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<WirePaper> for Paper {
    type Error = ClientError;

    fn try_from(wire: WirePaper) -> Result<Self, Self::Error> {
        // Stored papers carry the catalog id under `id`; `paper_id` is a fallback.
        let id = [wire.id, wire.paper_id]
            .into_iter()
            .flatten()
            .map(WireId::into_string)
            .find(|id| !id.is_empty())
            .unwrap_or_default();
        if id.is_empty() {
            return Err(ClientError::Validation("paper without an id".to_string()));
        }
        let title = non_blank(wire.title).unwrap_or_else(|| UNTITLED_PAPER.to_string());

        let mut paper = Self::new(PaperId::new(id), title);
        paper.authors = wire.authors.map(WireAuthors::into_text).unwrap_or_default();
        paper.abstract_text = non_blank(wire.abstract_text);
        paper.url = non_blank(wire.url);
        paper.doi = non_blank(wire.doi);
        paper.publication_date =
            non_blank(wire.publication_date).or_else(|| wire.year.map(|y| y.to_string()));
        paper.venue = non_blank(wire.venue);
        paper.citation_count = wire.citation_count.or(wire.citation_count_camel);
        paper.source = non_blank(wire.source);
        Ok(paper)
    }
}

/// A paper list, bare or wrapped.
///
/// Entries stay untyped until [`into_papers`](Self::into_papers) so one bad
/// entry can't fail the whole list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WirePaperList {
    Wrapped { papers: Vec<Value> },
    Bare(Vec<Value>),
}

impl WirePaperList {
    /// Normalize every entry, dropping the ones that fail to parse or validate.
    pub fn into_papers(self) -> Vec<Paper> {
        let raw = match self {
            Self::Wrapped { papers } | Self::Bare(papers) => papers,
        };
        lenient_entries::<WirePaper, Paper>(raw, "paper")
    }
}

/// Convert each raw entry through its wire schema, logging and skipping
/// failures.
pub fn lenient_entries<W, T>(values: Vec<Value>, kind: &str) -> Vec<T>
where
    W: DeserializeOwned,
    T: TryFrom<W, Error = ClientError>,
{
    values
        .into_iter()
        .filter_map(|value| {
            let converted = serde_json::from_value::<W>(value)
                .map_err(|e| ClientError::Parse(e.to_string()))
                .and_then(T::try_from);
            match converted {
                Ok(entity) => Some(entity),
                Err(error) => {
                    tracing::warn!(%error, kind, "dropping malformed entry");
                    None
                }
            }
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireWorkspace {
    pub id: WireId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TryFrom<WireWorkspace> for Workspace {
    type Error = ClientError;

    fn try_from(wire: WireWorkspace) -> Result<Self, Self::Error> {
        let id = wire.id.into_string();
        if id.is_empty() {
            return Err(ClientError::Validation(
                "workspace without an id".to_string(),
            ));
        }
        let Some(name) = non_blank(wire.name) else {
            return Err(ClientError::Validation(format!(
                "workspace {id} has no name"
            )));
        };
        Ok(Self {
            id: WorkspaceId::new(id),
            name,
            description: non_blank(wire.description),
            tags: wire.tags.unwrap_or_default(),
            created_at: wire.created_at.as_deref().and_then(parse_timestamp),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireUser {
    pub id: WireId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<WireUser> for User {
    fn from(wire: WireUser) -> Self {
        Self {
            id: wire.id.into_string(),
            email: wire.email,
            name: non_blank(wire.name).unwrap_or_default(),
            institution: non_blank(wire.institution),
            created_at: wire.created_at.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Parse a server timestamp.
///
/// Accepts RFC 3339 and the offset-less ISO form Python emits by default,
/// which is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewResponse {
    pub literature_review: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Interpret the body of a successful `POST /workspaces/{id}/papers`.
///
/// Servers that echo the stored paper are trusted. The common
/// `{"message": ..., "success": true}` acknowledgement (also sent when the
/// paper was already present) yields the draft's own paper.
pub fn added_paper(body: &serde_json::Value, draft: &PaperDraft) -> Paper {
    let echoes_paper = ["id", "paper_id"]
        .iter()
        .any(|key| body.get(key).is_some_and(|v| !v.is_null()));
    if !echoes_paper {
        return draft.to_paper();
    }
    let parsed = serde_json::from_value::<WirePaper>(body.clone())
        .ok()
        .and_then(|wire| Paper::try_from(wire).ok());
    let Some(mut paper) = parsed else {
        return draft.to_paper();
    };
    if paper.title == UNTITLED_PAPER && !draft.title.trim().is_empty() {
        paper.title.clone_from(&draft.title);
    }
    paper
}
