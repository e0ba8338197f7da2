use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PaperSelectionArgs;
use crate::commands::shared::selection::selected_papers;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct InsightsResponse {
    workspace: String,
    papers: usize,
    insights: String,
}

pub async fn run(
    target: &PaperSelectionArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let papers = selected_papers(ctx, target).await?;
    let insights = ctx.assistant().insights(&papers).await?;
    output(
        &InsightsResponse {
            workspace: target.workspace.clone(),
            papers: papers.len(),
            insights,
        },
        flags.format,
    )
}
