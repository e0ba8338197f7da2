//! Sequential import of papers into a workspace.

use rh_client::{ClientError, WorkspaceStore};
use rh_core::entities::{Paper, PaperDraft};
use rh_core::{PaperId, WorkspaceId};

use crate::notice::Notice;

/// Outcome of [`import_entities`]. Already imported papers are never
/// rolled back.
#[derive(Debug)]
pub struct ImportReport {
    pub imported: Vec<Paper>,
    /// The paper that stopped the import, and why.
    pub failure: Option<(PaperId, ClientError)>,
    /// Drafts never attempted because of the failure.
    pub skipped: usize,
}

impl ImportReport {
    #[must_use]
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// `"N imported"`, plus the failure when there was one.
    #[must_use]
    pub fn summary(&self) -> String {
        let head = format!("{} imported", self.imported.len());
        match &self.failure {
            None => head,
            Some((id, error)) => format!("{head}; failed on {id}: {error}"),
        }
    }

    #[must_use]
    pub fn notice(&self) -> Notice {
        if self.is_complete() {
            Notice::success(self.summary())
        } else {
            Notice::error(self.summary())
        }
    }
}

/// Add each draft to `workspace`, one call at a time, in order.
///
/// Stops at the first failure; the report counts the calls that succeeded
/// before it.
pub async fn import_entities<S: WorkspaceStore + ?Sized>(
    store: &S,
    workspace: &WorkspaceId,
    drafts: &[PaperDraft],
) -> ImportReport {
    let mut imported = Vec::with_capacity(drafts.len());
    for (index, draft) in drafts.iter().enumerate() {
        let result = match draft.validate() {
            Ok(()) => store.add_paper(workspace, draft).await,
            Err(error) => Err(error.into()),
        };
        match result {
            Ok(paper) => {
                tracing::debug!(%workspace, paper = %paper.id, "imported");
                imported.push(paper);
            }
            Err(error) => {
                tracing::warn!(%workspace, paper = %draft.paper_id, %error, "import aborted");
                return ImportReport {
                    imported,
                    failure: Some((draft.paper_id.clone(), error)),
                    skipped: drafts.len() - index - 1,
                };
            }
        }
    }
    ImportReport {
        imported,
        failure: None,
        skipped: 0,
    }
}
