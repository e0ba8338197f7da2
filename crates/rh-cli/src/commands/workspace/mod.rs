mod create;
mod delete;
mod list;
mod papers;
mod remove_paper;

use serde::Serialize;

use rh_core::entities::WorkspaceOverview;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::WorkspaceCommands;
use crate::context::AppContext;

/// Handle `rhub workspace <subcommand>`.
pub async fn handle(
    action: &WorkspaceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        WorkspaceCommands::List => list::run(ctx, flags).await,
        WorkspaceCommands::Create {
            name,
            description,
            tags,
        } => create::run(name, description.as_deref(), tags.as_deref(), ctx, flags).await,
        WorkspaceCommands::Delete { ids } => delete::run(ids, ctx, flags).await,
        WorkspaceCommands::Papers { id } => papers::run(id, ctx, flags).await,
        WorkspaceCommands::RemovePaper { workspace, papers } => {
            remove_paper::run(workspace, papers, ctx, flags).await
        }
    }
}

/// One workspace line, shared by list/create/delete.
#[derive(Debug, Serialize)]
struct WorkspaceRow {
    id: String,
    name: String,
    papers: usize,
    tags: Vec<String>,
    description: Option<String>,
    created_at: Option<String>,
}

impl From<&WorkspaceOverview> for WorkspaceRow {
    fn from(overview: &WorkspaceOverview) -> Self {
        let workspace = &overview.workspace;
        Self {
            id: workspace.id.to_string(),
            name: workspace.name.clone(),
            papers: overview.paper_count,
            tags: workspace.tags.clone(),
            description: workspace.description.clone(),
            created_at: workspace
                .created_at
                .map(|at| at.format("%Y-%m-%d").to_string()),
        }
    }
}
