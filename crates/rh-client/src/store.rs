//! Capability traits for the remote store.
//!
//! Each trait covers one slice of the API so consumers can depend on only
//! what they call: the mirror needs [`WorkspaceStore`], the AI tools need
//! [`AiBackend`]. [`RemoteStore`] bundles all three.

use std::path::Path;

use async_trait::async_trait;
use rh_core::entities::{Paper, PaperDraft, Workspace, WorkspaceDraft};
use rh_core::enums::PaperSource;
use rh_core::{PaperId, WorkspaceId};

use crate::error::ClientError;

/// Largest page the search endpoint serves.
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// Workspace CRUD and workspace membership.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, ClientError>;

    async fn create_workspace(&self, draft: &WorkspaceDraft) -> Result<Workspace, ClientError>;

    /// Delete a workspace. A 404 surfaces as [`ClientError::NotFound`];
    /// callers decide whether that counts as success.
    async fn delete_workspace(&self, id: &WorkspaceId) -> Result<(), ClientError>;

    async fn list_workspace_papers(&self, id: &WorkspaceId) -> Result<Vec<Paper>, ClientError>;

    /// Add a paper and return the paper as stored.
    async fn add_paper(
        &self,
        workspace: &WorkspaceId,
        draft: &PaperDraft,
    ) -> Result<Paper, ClientError>;

    async fn remove_paper(
        &self,
        workspace: &WorkspaceId,
        paper: &PaperId,
    ) -> Result<(), ClientError>;
}

/// Paper search, lookup and PDF text extraction.
#[async_trait]
pub trait PaperCatalog: Send + Sync {
    async fn search_papers(&self, query: &SearchQuery) -> Result<Vec<Paper>, ClientError>;

    async fn get_paper(&self, id: &PaperId) -> Result<Paper, ClientError>;

    /// Upload a PDF and return its extracted text.
    async fn extract_pdf(&self, upload: PdfUpload) -> Result<String, ClientError>;
}

/// The AI endpoints.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Ask a free-form question about the given context.
    async fn chat(&self, context: &str, question: &str) -> Result<String, ClientError>;

    /// Server-side literature review over stored papers.
    async fn literature_review(&self, paper_ids: &[PaperId]) -> Result<String, ClientError>;
}

/// Everything the remote API offers.
pub trait RemoteStore: WorkspaceStore + PaperCatalog + AiBackend {}

impl<T: WorkspaceStore + PaperCatalog + AiBackend> RemoteStore for T {}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    query: String,
    source: PaperSource,
    limit: u32,
}

impl SearchQuery {
    /// Build a query, clamping `limit` into `1..=50`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when the query text is blank.
    pub fn new(query: &str, source: PaperSource, limit: u32) -> Result<Self, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::Validation(
                "search query must not be empty".to_string(),
            ));
        }
        Ok(Self {
            query: query.to_string(),
            source,
            limit: limit.clamp(1, MAX_SEARCH_LIMIT),
        })
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn source(&self) -> PaperSource {
        self.source
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// URL query string (`query=..&source=..&limit=..`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        format!(
            "query={}&source={}&limit={}",
            urlencoding::encode(&self.query),
            self.source.as_str(),
            self.limit
        )
    }
}

/// A PDF ready to be sent to the extraction endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for PdfUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfUpload")
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl PdfUpload {
    /// Wrap in-memory bytes, checking the name and size.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for non-PDF names or empty files.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ClientError> {
        let upload = Self {
            file_name: file_name.into(),
            bytes,
        };
        upload.validate()?;
        Ok(upload)
    }

    /// Read a PDF from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the file can't be read and
    /// [`ClientError::Validation`] if it isn't a non-empty `.pdf`.
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Check the name before reading a possibly large file.
        if !is_pdf_name(&file_name) {
            return Err(not_a_pdf(&file_name));
        }
        let bytes = std::fs::read(path)?;
        Self::new(file_name, bytes)
    }

    fn validate(&self) -> Result<(), ClientError> {
        if !is_pdf_name(&self.file_name) {
            return Err(not_a_pdf(&self.file_name));
        }
        if self.bytes.is_empty() {
            return Err(ClientError::Validation(format!(
                "'{}' is empty",
                self.file_name
            )));
        }
        Ok(())
    }
}

fn is_pdf_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn not_a_pdf(name: &str) -> ClientError {
    ClientError::Validation(format!("'{name}' is not a PDF file"))
}
