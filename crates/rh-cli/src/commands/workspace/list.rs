use rh_core::entities::WorkspaceOverview;
use rh_mirror::{Notifier, OptimisticController, WorkspaceCollection};
use serde::Serialize;

use super::WorkspaceRow;
use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct WorkspaceListResponse {
    count: usize,
    total_papers: usize,
    workspaces: Vec<WorkspaceRow>,
}

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let controller = OptimisticController::new(
        WorkspaceCollection::new(ctx.client.clone()),
        Notifier::silent(),
    );
    controller.load().await?;

    let overviews = controller.items();
    let total_papers = WorkspaceOverview::total_papers(&overviews);
    let shown = usize::try_from(effective_limit(None, flags.limit, u32::MAX))?;
    let workspaces = overviews
        .iter()
        .take(shown)
        .map(WorkspaceRow::from)
        .collect::<Vec<_>>();

    output(
        &WorkspaceListResponse {
            count: overviews.len(),
            total_papers,
            workspaces,
        },
        flags.format,
    )
}
