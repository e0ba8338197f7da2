use clap::{Args, Subcommand};

/// AI assistant commands. Every command works on a paper selection.
#[derive(Clone, Debug, Subcommand)]
pub enum AiCommands {
    /// Ask a question about the selected papers.
    Chat {
        #[command(flatten)]
        target: PaperSelectionArgs,
        question: String,
    },
    /// One summary per selected paper.
    Summaries {
        #[command(flatten)]
        target: PaperSelectionArgs,
        /// Write a plain-text report to this path.
        #[arg(long)]
        report: Option<String>,
    },
    /// Cross-paper themes, gaps, and directions.
    Insights {
        #[command(flatten)]
        target: PaperSelectionArgs,
    },
    /// Literature review of the selected papers.
    Review {
        #[command(flatten)]
        target: PaperSelectionArgs,
        /// Use the dedicated review endpoint instead of chat.
        #[arg(long)]
        endpoint: bool,
    },
}

/// Workspace plus an optional subset of its papers. No `--paper` selects all.
#[derive(Clone, Debug, Args)]
pub struct PaperSelectionArgs {
    #[arg(long)]
    pub workspace: String,
    #[arg(long)]
    pub paper: Vec<String>,
}
