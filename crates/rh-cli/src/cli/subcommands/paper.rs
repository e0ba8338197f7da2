use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum PaperCommands {
    /// Fetch one paper by id.
    Get { id: String },
}
