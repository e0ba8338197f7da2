//! In-memory [`WorkspaceStore`] with injectable failures.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rh_client::{ClientError, WorkspaceStore};
use rh_core::entities::{Paper, PaperDraft, Workspace, WorkspaceDraft};
use rh_core::{PaperId, WorkspaceId};

#[derive(Default)]
struct State {
    workspaces: Vec<Workspace>,
    papers: HashMap<WorkspaceId, Vec<Paper>>,
    next_id: u64,
    failing_deletes: HashSet<String>,
    failing_paper_lists: HashSet<WorkspaceId>,
    fail_creates: bool,
    fail_add_call: Option<usize>,
    add_calls: usize,
    delete_delay: Option<Duration>,
    calls: Vec<String>,
}

/// A remote store kept in memory.
///
/// Deleting a missing workspace answers 404 like the real server.
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
}

fn server_error(what: &str) -> ClientError {
    ClientError::Api {
        status: 500,
        message: format!("injected failure: {what}"),
    }
}

impl FakeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `(id, name)` workspaces.
    #[must_use]
    pub fn with_workspaces(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut state = store.state();
            for (id, name) in entries {
                state.workspaces.push(Workspace {
                    id: WorkspaceId::new(*id),
                    name: (*name).to_string(),
                    description: None,
                    tags: Vec::new(),
                    created_at: None,
                });
            }
            state.next_id = entries.len() as u64 + 100;
        }
        store
    }

    pub fn insert_paper(&self, workspace: &str, paper: Paper) {
        self.state()
            .papers
            .entry(WorkspaceId::new(workspace))
            .or_default()
            .push(paper);
    }

    /// Deletes of `id` (workspace or paper) fail with a 500.
    pub fn fail_deletes_of(&self, id: &str) {
        self.state().failing_deletes.insert(id.to_string());
    }

    pub fn fail_paper_list_of(&self, workspace: &str) {
        self.state()
            .failing_paper_lists
            .insert(WorkspaceId::new(workspace));
    }

    pub fn fail_creates(&self) {
        self.state().fail_creates = true;
    }

    /// The `n`th `add_paper` call (1-based) fails.
    pub fn fail_add_call(&self, n: usize) {
        self.state().fail_add_call = Some(n);
    }

    /// Every delete sleeps first, so deletes overlap.
    pub fn delay_deletes(&self, delay: Duration) {
        self.state().delete_delay = Some(delay);
    }

    #[must_use]
    pub fn workspace_ids(&self) -> Vec<WorkspaceId> {
        self.state().workspaces.iter().map(|w| w.id.clone()).collect()
    }

    #[must_use]
    pub fn paper_ids(&self, workspace: &str) -> Vec<PaperId> {
        self.state()
            .papers
            .get(&WorkspaceId::new(workspace))
            .map(|papers| papers.iter().map(|p| p.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Log of calls as `"<method> <arg>"`.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: String) {
        self.state().calls.push(call);
    }

    async fn maybe_delay(&self) {
        let delay = self.state().delete_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl WorkspaceStore for FakeStore {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, ClientError> {
        self.record("list_workspaces".into());
        Ok(self.state().workspaces.clone())
    }

    async fn create_workspace(&self, draft: &WorkspaceDraft) -> Result<Workspace, ClientError> {
        self.record(format!("create_workspace {}", draft.name));
        let mut state = self.state();
        if state.fail_creates {
            return Err(server_error("create"));
        }
        state.next_id += 1;
        let workspace = Workspace {
            id: WorkspaceId::new(state.next_id.to_string()),
            name: draft.name.clone(),
            description: Some(draft.description.clone()).filter(|d| !d.is_empty()),
            tags: draft.tags.clone(),
            created_at: None,
        };
        state.workspaces.push(workspace.clone());
        Ok(workspace)
    }

    async fn delete_workspace(&self, id: &WorkspaceId) -> Result<(), ClientError> {
        self.record(format!("delete_workspace {id}"));
        self.maybe_delay().await;
        let mut state = self.state();
        if state.failing_deletes.contains(id.as_str()) {
            return Err(server_error("delete"));
        }
        let before = state.workspaces.len();
        state.workspaces.retain(|w| &w.id != id);
        if state.workspaces.len() == before {
            return Err(ClientError::NotFound {
                message: "Workspace not found".into(),
            });
        }
        state.papers.remove(id);
        Ok(())
    }

    async fn list_workspace_papers(&self, id: &WorkspaceId) -> Result<Vec<Paper>, ClientError> {
        self.record(format!("list_workspace_papers {id}"));
        let state = self.state();
        if state.failing_paper_lists.contains(id) {
            return Err(server_error("list papers"));
        }
        Ok(state.papers.get(id).cloned().unwrap_or_default())
    }

    async fn add_paper(
        &self,
        workspace: &WorkspaceId,
        draft: &PaperDraft,
    ) -> Result<Paper, ClientError> {
        self.record(format!("add_paper {}", draft.paper_id));
        let mut state = self.state();
        state.add_calls += 1;
        if state.fail_add_call == Some(state.add_calls) {
            return Err(server_error("add paper"));
        }
        let paper = draft.to_paper();
        let papers = state.papers.entry(workspace.clone()).or_default();
        if !papers.iter().any(|p| p.id == paper.id) {
            papers.push(paper.clone());
        }
        Ok(paper)
    }

    async fn remove_paper(
        &self,
        workspace: &WorkspaceId,
        paper: &PaperId,
    ) -> Result<(), ClientError> {
        self.record(format!("remove_paper {paper}"));
        self.maybe_delay().await;
        let mut state = self.state();
        if state.failing_deletes.contains(paper.as_str()) {
            return Err(server_error("remove paper"));
        }
        if let Some(papers) = state.papers.get_mut(workspace) {
            papers.retain(|p| &p.id != paper);
        }
        Ok(())
    }
}
