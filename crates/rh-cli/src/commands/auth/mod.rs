mod login;
mod logout;
mod register;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `rhub auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::run(args, ctx, flags).await,
        AuthCommands::Register(args) => register::run(args, ctx, flags).await,
        AuthCommands::Logout => logout::run(ctx, flags),
        AuthCommands::Status => status::run(ctx, flags).await,
    }
}
