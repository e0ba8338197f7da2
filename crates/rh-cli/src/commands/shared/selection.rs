use anyhow::bail;
use rh_core::entities::Paper;
use rh_core::{PaperId, WorkspaceId};
use rh_mirror::{LocalMirror, Notifier, OptimisticController, WorkspacePapers};

use crate::cli::subcommands::PaperSelectionArgs;
use crate::context::AppContext;

/// Load a workspace's papers and select the requested ones, or all of
/// them when none were named. Order follows the selection.
pub async fn selected_papers(
    ctx: &AppContext,
    target: &PaperSelectionArgs,
) -> anyhow::Result<Vec<Paper>> {
    let workspace = WorkspaceId::new(target.workspace.as_str());
    let controller = OptimisticController::new(
        WorkspacePapers::new(ctx.client.clone(), workspace),
        Notifier::silent(),
    );
    controller.load().await?;

    let missing = controller.with_mirror_mut(|mirror| select_ids(mirror, &target.paper));
    if !missing.is_empty() {
        bail!(
            "not in workspace {}: {}",
            target.workspace,
            missing.join(", ")
        );
    }
    Ok(controller.selected())
}

/// Apply a selection; returns the ids that are not in the mirror.
pub fn select_ids(mirror: &mut LocalMirror<Paper>, ids: &[String]) -> Vec<String> {
    mirror.clear_selection();
    if ids.is_empty() {
        mirror.select_all();
        return Vec::new();
    }
    ids.iter()
        .filter(|id| !mirror.select(&PaperId::new(id.as_str())))
        .cloned()
        .collect()
}
