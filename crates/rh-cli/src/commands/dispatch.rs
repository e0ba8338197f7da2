use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Health => commands::health::handle(ctx, flags).await,
        Commands::Search(args) => commands::search::handle(&args, ctx, flags).await,
        Commands::Paper { action } => commands::paper::handle(&action, ctx, flags).await,
        Commands::Workspace { action } => commands::workspace::handle(&action, ctx, flags).await,
        Commands::Import(args) => commands::import::handle(&args, ctx, flags).await,
        Commands::Upload(args) => commands::upload::handle(&args, ctx, flags).await,
        Commands::Ai { action } => commands::ai::handle(&action, ctx, flags).await,
        Commands::Docs { action } => commands::docs::handle(&action, ctx, flags),
    }
}
