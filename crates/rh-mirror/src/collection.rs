//! Remote collections a mirror can be bound to.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use rh_client::{ClientError, WorkspaceStore};
use rh_core::WorkspaceId;
use rh_core::entities::{Paper, PaperDraft, WorkspaceDraft, WorkspaceOverview};

use crate::error::MirrorError;
use crate::mirror::Identified;

/// Fetch, create and delete for one list-backed view.
#[async_trait]
pub trait Collection: Send + Sync + 'static {
    type Item: Identified + Clone + Send + Sync + 'static;
    type Draft: Send + Sync;

    /// Singular noun for notices ("workspace", "paper").
    fn noun(&self) -> &'static str;

    /// Label for an item in notices.
    fn label(item: &Self::Item) -> String;

    /// Required-field checks run before any remote call.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Validation`] for an incomplete draft.
    fn validate(&self, draft: &Self::Draft) -> Result<(), MirrorError>;

    /// The authoritative collection.
    async fn fetch_all(&self) -> Result<Vec<Self::Item>, ClientError>;

    /// Create on the remote side; returns the canonical entity.
    async fn create(&self, draft: &Self::Draft) -> Result<Self::Item, ClientError>;

    async fn delete(&self, id: &<Self::Item as Identified>::Id) -> Result<(), ClientError>;
}

/// The signed-in user's workspaces, each with its paper count.
pub struct WorkspaceCollection<S> {
    store: Arc<S>,
}

impl<S: WorkspaceStore + 'static> WorkspaceCollection<S> {
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Paper count for every workspace, fetched concurrently. A failed
    /// fetch counts as 0.
    async fn paper_counts(&self, ids: &[WorkspaceId]) -> Vec<usize> {
        let fetches = ids.iter().map(|id| async move {
            match self.store.list_workspace_papers(id).await {
                Ok(papers) => papers.len(),
                Err(error) => {
                    tracing::warn!(workspace = %id, %error, "paper count unavailable");
                    0
                }
            }
        });
        join_all(fetches).await
    }
}

#[async_trait]
impl<S: WorkspaceStore + 'static> Collection for WorkspaceCollection<S> {
    type Item = WorkspaceOverview;
    type Draft = WorkspaceDraft;

    fn noun(&self) -> &'static str {
        "workspace"
    }

    fn label(item: &WorkspaceOverview) -> String {
        item.workspace.name.clone()
    }

    fn validate(&self, draft: &WorkspaceDraft) -> Result<(), MirrorError> {
        Ok(draft.validate()?)
    }

    async fn fetch_all(&self) -> Result<Vec<WorkspaceOverview>, ClientError> {
        let workspaces = self.store.list_workspaces().await?;
        let ids: Vec<_> = workspaces.iter().map(|w| w.id.clone()).collect();
        let counts = self.paper_counts(&ids).await;
        Ok(workspaces
            .into_iter()
            .zip(counts)
            .map(|(workspace, paper_count)| WorkspaceOverview {
                workspace,
                paper_count,
            })
            .collect())
    }

    async fn create(&self, draft: &WorkspaceDraft) -> Result<WorkspaceOverview, ClientError> {
        let workspace = self.store.create_workspace(draft).await?;
        Ok(WorkspaceOverview {
            workspace,
            paper_count: 0,
        })
    }

    async fn delete(&self, id: &WorkspaceId) -> Result<(), ClientError> {
        self.store.delete_workspace(id).await
    }
}

/// The papers inside one workspace.
pub struct WorkspacePapers<S> {
    store: Arc<S>,
    workspace: WorkspaceId,
}

impl<S: WorkspaceStore + 'static> WorkspacePapers<S> {
    pub const fn new(store: Arc<S>, workspace: WorkspaceId) -> Self {
        Self { store, workspace }
    }

    #[must_use]
    pub const fn workspace(&self) -> &WorkspaceId {
        &self.workspace
    }
}

#[async_trait]
impl<S: WorkspaceStore + 'static> Collection for WorkspacePapers<S> {
    type Item = Paper;
    type Draft = PaperDraft;

    fn noun(&self) -> &'static str {
        "paper"
    }

    fn label(item: &Paper) -> String {
        item.title.clone()
    }

    fn validate(&self, draft: &PaperDraft) -> Result<(), MirrorError> {
        Ok(draft.validate()?)
    }

    async fn fetch_all(&self) -> Result<Vec<Paper>, ClientError> {
        self.store.list_workspace_papers(&self.workspace).await
    }

    async fn create(&self, draft: &PaperDraft) -> Result<Paper, ClientError> {
        self.store.add_paper(&self.workspace, draft).await
    }

    async fn delete(&self, id: &rh_core::PaperId) -> Result<(), ClientError> {
        self.store.remove_paper(&self.workspace, id).await
    }
}
