use std::collections::HashSet;

use anyhow::bail;
use rh_core::WorkspaceId;
use rh_mirror::{Notifier, OptimisticController, WorkspaceCollection};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::deletes::DeleteTally;
use crate::commands::shared::notices;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct WorkspaceDeleteResponse {
    #[serde(flatten)]
    tally: DeleteTally,
    remaining: usize,
}

/// Deletes run optimistically and concurrently; once they settle the mirror
/// holds the server's view, so any requested id still present failed.
pub async fn run(ids: &[String], ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (notifier, mut rx) = Notifier::channel();
    let controller =
        OptimisticController::new(WorkspaceCollection::new(ctx.client.clone()), notifier);
    controller.load().await?;

    let mut removed_locally = HashSet::new();
    for id in ids {
        let outcome = controller.apply_delete(&WorkspaceId::new(id.as_str()));
        tracing::debug!(workspace = %id, operation = %outcome.operation, removed = outcome.removed, "delete queued");
        if outcome.removed {
            removed_locally.insert(id.clone());
        }
    }
    controller.settle().await;
    notices::flush(&mut rx);

    let tally = controller.with_mirror(|mirror| {
        DeleteTally::classify(ids, &removed_locally, |id| {
            mirror.contains(&WorkspaceId::new(id))
        })
    });
    let remaining = controller.with_mirror(|mirror| mirror.len());
    let failures = tally.failed.len();

    output(&WorkspaceDeleteResponse { tally, remaining }, flags.format)?;
    if failures > 0 {
        bail!("{failures} workspace(s) could not be deleted");
    }
    Ok(())
}
