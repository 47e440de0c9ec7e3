//! CLI adapter for kbsearch
//!
//! Provides a command-line interface over the knowledge base index.
//! The index lives in memory only, so every command that reads it
//! builds it first; `interactive` builds once and serves many queries.
//!
//! # Architecture
//!
//! ```text
//!     +------------------+
//!     |      core/       |
//!     |  (domain logic)  |
//!     +--------+---------+
//!              |
//!              v
//!     +------------------+
//!     |      cli/        |
//!     | (clap adapter)   |
//!     +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kb - Semantic search over a folder of markdown files
///
/// Indexes every `*.md` file in a folder with TF-IDF (optionally
/// reduced with LSA) and answers free-text similarity queries.
#[derive(Parser, Debug)]
#[command(name = "kb")]
#[command(author = "RHOBIMD HEALTH")]
#[command(version)]
#[command(about = "Semantic search over a folder of markdown files", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Knowledge base folder (overrides config and KBSEARCH_KB_DIR)
    #[arg(long, global = true)]
    pub kb_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
///
/// Command names match the index operations (underscores become hyphens).
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the index and print a summary
    Build(commands::BuildArgs),

    /// Show index statistics
    Stats(commands::StatsArgs),

    /// Search the knowledge base
    Search(commands::SearchArgs),

    /// List indexed documents
    #[command(name = "list-documents")]
    ListDocuments(commands::ListArgs),

    /// Show one document
    #[command(name = "get-document")]
    GetDocument(commands::GetArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Build once, then read queries from stdin
    Interactive(commands::InteractiveArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  kb completions bash > ~/.local/share/bash-completion/completions/kb
    ///   zsh:   kb completions zsh > ~/.zfunc/_kb
    ///   fish:  kb completions fish > ~/.config/fish/completions/kb.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    // Load configuration
    let mut config = Config::load()?;
    if let Some(kb_dir) = cli.kb_dir {
        config.index.kb_dir = kb_dir;
    }
    config.log_config();

    // Create services
    let services = Arc::new(Services::new(config));

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &services, cli.format),
        Commands::Stats(args) => commands::stats::execute(args, &services, cli.format),
        Commands::Search(args) => commands::search::execute(args, &services, cli.format),
        Commands::ListDocuments(args) => {
            commands::documents::execute_list(args, &services, cli.format)
        }
        Commands::GetDocument(args) => {
            commands::documents::execute_get(args, &services, cli.format)
        }
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format),
        Commands::Interactive(args) => {
            commands::interactive::execute(args, &services, cli.format)
        }
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
