use clap::{ArgGroup, Subcommand};

/// Document commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DocsCommands {
    /// List saved documents.
    List,
    /// Create an empty document.
    New { title: String },
    /// Print a document.
    Show { id: String },
    /// Overwrite a document's title and content.
    #[command(group(ArgGroup::new("body").required(true).args(["content", "content_file"])))]
    Save {
        id: String,
        /// Keeps the current title when omitted.
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<String>,
    },
    /// Delete a document.
    Delete { id: String },
    /// Write a document to `<dir>/<title>.html`.
    Export {
        id: String,
        #[arg(long, default_value = ".")]
        dir: String,
    },
}
