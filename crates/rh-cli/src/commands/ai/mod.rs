mod chat;
mod insights;
mod review;
mod summaries;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AiCommands;
use crate::context::AppContext;

/// Handle `rhub ai <subcommand>`.
pub async fn handle(action: &AiCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AiCommands::Chat { target, question } => chat::run(target, question, ctx, flags).await,
        AiCommands::Summaries { target, report } => {
            summaries::run(target, report.as_deref(), ctx, flags).await
        }
        AiCommands::Insights { target } => insights::run(target, ctx, flags).await,
        AiCommands::Review { target, endpoint } => review::run(target, *endpoint, ctx, flags).await,
    }
}
