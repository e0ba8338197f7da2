use rh_core::WorkspaceId;
use rh_mirror::{Notifier, OptimisticController, WorkspacePapers};

use crate::cli::GlobalFlags;
use crate::commands::shared::papers::output_papers;
use crate::context::AppContext;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let controller = OptimisticController::new(
        WorkspacePapers::new(ctx.client.clone(), WorkspaceId::new(id)),
        Notifier::silent(),
    );
    controller.load().await?;
    output_papers(None, Some(id.to_string()), &controller.items(), flags)
}
