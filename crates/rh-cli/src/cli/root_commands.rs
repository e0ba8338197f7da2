use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AiCommands, AuthCommands, DocsCommands, PaperCommands, WorkspaceCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Login, registration, and stored credentials.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Check that the API is reachable.
    Health,
    /// Search papers across the configured sources.
    Search(SearchArgs),
    /// Single-paper lookups.
    Paper {
        #[command(subcommand)]
        action: PaperCommands,
    },
    /// Workspaces.
    Workspace {
        #[command(subcommand)]
        action: WorkspaceCommands,
    },
    /// Search, then save the results into a workspace one by one.
    Import(ImportArgs),
    /// Extract a PDF and optionally save it as a workspace paper.
    Upload(UploadArgs),
    /// AI research assistant.
    Ai {
        #[command(subcommand)]
        action: AiCommands,
    },
    /// Local rich-text documents.
    Docs {
        #[command(subcommand)]
        action: DocsCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Free-text query.
    pub query: String,
    /// Source index: all, arxiv, openalex, semantic_scholar
    #[arg(long)]
    pub source: Option<String>,
    /// Per-command cap (overrides the global --limit)
    #[arg(long)]
    pub max_results: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Destination workspace.
    #[arg(long)]
    pub workspace: String,
    #[command(flatten)]
    pub search: SearchArgs,
    /// Only import these paper ids from the results (repeatable).
    #[arg(long)]
    pub paper: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct UploadArgs {
    /// Path to a `.pdf` file.
    pub file: String,
    /// Save the extracted paper into this workspace.
    #[arg(long)]
    pub workspace: Option<String>,
    /// Ask the AI for a summary of the extracted text.
    #[arg(long)]
    pub summarize: bool,
}
