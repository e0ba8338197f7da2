use anyhow::bail;
use rh_core::WorkspaceId;
use rh_core::entities::{Paper, PaperDraft};
use rh_mirror::{LocalMirror, import_entities};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::commands::search::run_search;
use crate::commands::shared::notices;
use crate::commands::shared::papers::PaperRow;
use crate::commands::shared::selection::select_ids;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ImportResponse {
    workspace: String,
    summary: String,
    skipped: usize,
    imported: Vec<PaperRow>,
}

/// Handle `rhub import`: search, pick, then add one paper at a time.
pub async fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let results = run_search(&args.search, ctx, flags).await?;
    let chosen = choose(results, &args.paper)?;
    if chosen.is_empty() {
        bail!("search for '{}' returned nothing to import", args.search.query);
    }

    let drafts = chosen.iter().map(PaperDraft::from_paper).collect::<Vec<_>>();
    let workspace = WorkspaceId::new(args.workspace.as_str());
    let report = import_entities(ctx.client.as_ref(), &workspace, &drafts).await;
    notices::show(&report.notice());

    output(
        &ImportResponse {
            workspace: args.workspace.clone(),
            summary: report.summary(),
            skipped: report.skipped,
            imported: report.imported.iter().map(PaperRow::from).collect(),
        },
        flags.format,
    )?;
    if let Some((paper, error)) = report.failure {
        bail!("import stopped at {paper}: {error}");
    }
    Ok(())
}

/// The named results, in the order named, or all of them.
fn choose(results: Vec<Paper>, ids: &[String]) -> anyhow::Result<Vec<Paper>> {
    let mut mirror = LocalMirror::from_items(results);
    let missing = select_ids(&mut mirror, ids);
    if !missing.is_empty() {
        bail!("not in the search results: {}", missing.join(", "));
    }
    Ok(mirror.selected_items().into_iter().cloned().collect())
}
