use anyhow::Context;
use rh_ai::render_summaries_report;
use rh_core::entities::PaperSummary;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PaperSelectionArgs;
use crate::commands::shared::selection::selected_papers;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct SummariesResponse {
    workspace: String,
    report: Option<String>,
    summaries: Vec<PaperSummary>,
}

pub async fn run(
    target: &PaperSelectionArgs,
    report: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let papers = selected_papers(ctx, target).await?;
    let batch = ctx.assistant().summarize_batch(&papers).await?;

    if let Some(path) = report {
        std::fs::write(path, render_summaries_report(&batch.summaries))
            .with_context(|| format!("failed to write summaries report to {path}"))?;
        tracing::info!(path, "summaries report written");
    }

    output(
        &SummariesResponse {
            workspace: target.workspace.clone(),
            report: report.map(str::to_string),
            summaries: batch.summaries,
        },
        flags.format,
    )
}
