use rh_client::PaperCatalog;
use rh_core::PaperId;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PaperCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rhub paper`.
pub async fn handle(
    action: &PaperCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PaperCommands::Get { id } => {
            let paper = ctx.client.get_paper(&PaperId::new(id.as_str())).await?;
            output(&paper, flags.format)
        }
    }
}
