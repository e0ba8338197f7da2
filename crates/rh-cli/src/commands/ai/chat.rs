use rh_ai::ChatSession;
use rh_core::entities::ChatMessage;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PaperSelectionArgs;
use crate::commands::shared::selection::selected_papers;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ChatResponse<'a> {
    workspace: &'a str,
    papers: usize,
    messages: &'a [ChatMessage],
}

pub async fn run(
    target: &PaperSelectionArgs,
    question: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let papers = selected_papers(ctx, target).await?;
    let mut session = ChatSession::new();
    session.ask(ctx.client.as_ref(), &papers, question).await?;

    output(
        &ChatResponse {
            workspace: &target.workspace,
            papers: papers.len(),
            messages: session.messages(),
        },
        flags.format,
    )
}
