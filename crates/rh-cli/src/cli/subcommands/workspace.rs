use clap::Subcommand;

/// Workspace commands.
#[derive(Clone, Debug, Subcommand)]
pub enum WorkspaceCommands {
    /// List workspaces with their paper counts.
    List,
    /// Create a workspace.
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Comma-separated tags.
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete one or more workspaces.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// List the papers saved in a workspace.
    Papers { id: String },
    /// Remove papers from a workspace.
    RemovePaper {
        workspace: String,
        #[arg(required = true)]
        papers: Vec<String>,
    },
}
