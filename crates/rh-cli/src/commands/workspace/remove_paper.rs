use std::collections::HashSet;

use anyhow::bail;
use rh_core::{PaperId, WorkspaceId};
use rh_mirror::{Notifier, OptimisticController, WorkspacePapers};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::deletes::DeleteTally;
use crate::commands::shared::notices;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct RemovePaperResponse {
    workspace: String,
    #[serde(flatten)]
    tally: DeleteTally,
    remaining: usize,
}

pub async fn run(
    workspace: &str,
    papers: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let (notifier, mut rx) = Notifier::channel();
    let controller = OptimisticController::new(
        WorkspacePapers::new(ctx.client.clone(), WorkspaceId::new(workspace)),
        notifier,
    );
    controller.load().await?;

    let mut removed_locally = HashSet::new();
    for paper in papers {
        if controller.apply_delete(&PaperId::new(paper.as_str())).removed {
            removed_locally.insert(paper.clone());
        }
    }
    controller.settle().await;
    notices::flush(&mut rx);

    let tally = controller.with_mirror(|mirror| {
        DeleteTally::classify(papers, &removed_locally, |id| {
            mirror.contains(&PaperId::new(id))
        })
    });
    let failures = tally.failed.len();

    output(
        &RemovePaperResponse {
            workspace: workspace.to_string(),
            tally,
            remaining: controller.with_mirror(|mirror| mirror.len()),
        },
        flags.format,
    )?;
    if failures > 0 {
        bail!("{failures} paper(s) could not be removed from workspace {workspace}");
    }
    Ok(())
}
