//! Saving an uploaded PDF as a workspace paper.

use chrono::{DateTime, Utc};
use rh_client::{ClientError, WorkspaceStore};
use rh_core::WorkspaceId;
use rh_core::entities::{Paper, PaperDraft};

pub const UPLOADED_TITLE_FALLBACK: &str = "Uploaded Paper";
pub const UPLOADED_AUTHORS: &str = "Unknown";
/// Characters of extracted text used as the abstract when there's no
/// summary.
pub const EXCERPT_CHARS: usize = 500;

/// Draft for a paper built from an uploaded file.
///
/// Id is `uploaded_<unix millis>`, title is the file name without its
/// `.pdf` extension, abstract is the summary if there is one and a text
/// excerpt otherwise.
#[must_use]
pub fn uploaded_paper_draft(
    file_name: &str,
    extracted_text: &str,
    summary: Option<&str>,
    uploaded_at: DateTime<Utc>,
) -> PaperDraft {
    let abstract_text = match summary.map(str::trim).filter(|s| !s.is_empty()) {
        Some(summary) => summary.to_string(),
        None => {
            let excerpt: String = extracted_text.chars().take(EXCERPT_CHARS).collect();
            format!("{excerpt}...")
        }
    };
    PaperDraft {
        paper_id: format!("uploaded_{}", uploaded_at.timestamp_millis()).into(),
        title: title_from_file_name(file_name),
        authors: UPLOADED_AUTHORS.to_string(),
        abstract_text,
        url: String::new(),
    }
}

fn title_from_file_name(file_name: &str) -> String {
    let trimmed = file_name.trim();
    let stem = if trimmed.to_ascii_lowercase().ends_with(".pdf") {
        &trimmed[..trimmed.len() - 4]
    } else {
        trimmed
    };
    let stem = stem.trim();
    if stem.is_empty() {
        UPLOADED_TITLE_FALLBACK.to_string()
    } else {
        stem.to_string()
    }
}

/// Store an uploaded paper in `workspace`.
///
/// # Errors
///
/// Returns the [`ClientError`] from the add call.
pub async fn save_uploaded_paper<S: WorkspaceStore + ?Sized>(
    store: &S,
    workspace: &WorkspaceId,
    draft: &PaperDraft,
) -> Result<Paper, ClientError> {
    draft.validate()?;
    let paper = store.add_paper(workspace, draft).await?;
    tracing::info!(%workspace, paper = %paper.id, "uploaded paper saved");
    Ok(paper)
}
