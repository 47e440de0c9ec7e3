//! Build command - index the knowledge base folder

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::IndexStats;
use clap::Args;
use std::fmt::Write;
use std::sync::Arc;

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Execute the build command
pub fn execute(
    args: BuildArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "Indexing {}...",
            colors::file_path(&services.kb.kb_dir().display().to_string())
        );
    }

    let stats = services.kb.build()?;
    output::emit(&stats, format, render)?;

    Ok(())
}

/// Human-readable build summary
pub fn render(stats: &IndexStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} documents ({} chunks) in {}",
        colors::success("Indexed"),
        colors::number(&stats.documents_count.to_string()),
        colors::number(&stats.chunks_count.to_string()),
        colors::number(&output::format_duration_ms(
            stats.build_duration_ms.unwrap_or(0)
        ))
    );
    let _ = writeln!(out, "  Model: {}", colors::label(&stats.model_kind));
    out
}
