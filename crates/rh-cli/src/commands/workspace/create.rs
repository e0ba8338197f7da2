use rh_core::entities::WorkspaceDraft;
use rh_mirror::{Notifier, OptimisticController, WorkspaceCollection};

use super::WorkspaceRow;
use crate::cli::GlobalFlags;
use crate::commands::shared::notices;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    description: Option<&str>,
    tags: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let draft = WorkspaceDraft::new(name)
        .with_description(description.unwrap_or_default())
        .with_tag_list(tags.unwrap_or_default());

    let (notifier, mut rx) = Notifier::channel();
    let controller =
        OptimisticController::new(WorkspaceCollection::new(ctx.client.clone()), notifier);

    let created = controller.apply_create(&draft).await;
    // The follow-up resync only matters for a long-lived view.
    controller.detach_all();
    controller.settle().await;
    notices::flush(&mut rx);

    output(&WorkspaceRow::from(&created?), flags.format)
}
