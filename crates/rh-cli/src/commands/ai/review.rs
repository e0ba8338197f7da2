use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PaperSelectionArgs;
use crate::commands::shared::selection::selected_papers;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ReviewResponse {
    workspace: String,
    papers: usize,
    via: &'static str,
    review: String,
}

pub async fn run(
    target: &PaperSelectionArgs,
    endpoint: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let papers = selected_papers(ctx, target).await?;
    let assistant = ctx.assistant();
    let (via, review) = if endpoint {
        ("endpoint", assistant.literature_review(&papers).await?)
    } else {
        ("chat", assistant.review_via_chat(&papers).await?)
    };
    output(
        &ReviewResponse {
            workspace: target.workspace.clone(),
            papers: papers.len(),
            via,
            review,
        },
        flags.format,
    )
}
