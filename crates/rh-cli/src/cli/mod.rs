use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `rhub` binary.
#[derive(Debug, Parser)]
#[command(
    name = "rhub",
    version,
    about = "ResearchHub - search papers, curate workspaces, ask the AI"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress notices)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{AiCommands, DocsCommands, WorkspaceCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "rhub", "--format", "table", "--limit", "10", "--verbose", "health",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Health));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["rhub", "health", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["rhub", "--format", "xml", "health"]).is_err());
    }

    #[test]
    fn output_format_accepts_all_supported_values() {
        for value in ["json", "table", "raw"] {
            let cli = Cli::try_parse_from(["rhub", "--format", value, "health"])
                .expect("cli should parse");
            assert!(matches!(cli.command, Commands::Health));
        }
    }

    #[test]
    fn search_takes_query_source_and_local_cap() {
        let cli = Cli::try_parse_from([
            "rhub",
            "search",
            "graph neural networks",
            "--source",
            "arxiv",
            "--max-results",
            "5",
        ])
        .expect("cli should parse");

        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.query, "graph neural networks");
        assert_eq!(args.source.as_deref(), Some("arxiv"));
        assert_eq!(args.max_results, Some(5));
    }

    #[test]
    fn workspace_create_collects_optional_fields() {
        let cli = Cli::try_parse_from([
            "rhub",
            "workspace",
            "create",
            "Thesis",
            "--description",
            "chapter 2 sources",
            "--tags",
            "ml, nlp",
        ])
        .expect("cli should parse");

        let Commands::Workspace {
            action: WorkspaceCommands::Create { name, description, tags },
        } = cli.command
        else {
            panic!("expected workspace create");
        };
        assert_eq!(name, "Thesis");
        assert_eq!(description.as_deref(), Some("chapter 2 sources"));
        assert_eq!(tags.as_deref(), Some("ml, nlp"));
    }

    #[test]
    fn ai_chat_accepts_repeated_paper_ids() {
        let cli = Cli::try_parse_from([
            "rhub",
            "ai",
            "chat",
            "--workspace",
            "7",
            "--paper",
            "a",
            "--paper",
            "b",
            "What do these agree on?",
        ])
        .expect("cli should parse");

        let Commands::Ai {
            action: AiCommands::Chat { target, question },
        } = cli.command
        else {
            panic!("expected ai chat");
        };
        assert_eq!(target.workspace, "7");
        assert_eq!(target.paper, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(question, "What do these agree on?");
    }

    #[test]
    fn docs_save_requires_a_content_source() {
        assert!(Cli::try_parse_from(["rhub", "docs", "save", "42"]).is_err());

        let cli = Cli::try_parse_from(["rhub", "docs", "save", "42", "--content", "<p>x</p>"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Docs {
                action: DocsCommands::Save { .. }
            }
        ));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["rhub", "-q", "-l", "3", "docs", "list"])
            .expect("cli should parse");
        let flags = cli.global_flags();
        assert!(flags.quiet);
        assert_eq!(flags.limit, Some(3));
        assert_eq!(flags.format, OutputFormat::Json);
    }
}
