//! Stats command - show index statistics

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::IndexStats;
use clap::Args;
use std::fmt::Write;
use std::sync::Arc;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {}

/// Execute the stats command
pub fn execute(
    _args: StatsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    services.kb.build()?;
    output::emit(&services.kb.stats(), format, render)?;
    Ok(())
}

/// Human-readable statistics
pub fn render(stats: &IndexStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", colors::label("Knowledge base"));
    let _ = writeln!(out, "  Folder:      {}", colors::file_path(&stats.kb_dir));
    let _ = writeln!(
        out,
        "  Documents:   {}",
        colors::number(&stats.documents_count.to_string())
    );
    let _ = writeln!(
        out,
        "  Chunks:      {}",
        colors::number(&stats.chunks_count.to_string())
    );
    let _ = writeln!(
        out,
        "  Characters:  {}",
        colors::number(&stats.total_chars.to_string())
    );
    let _ = writeln!(
        out,
        "  Chunking:    {} chars, {} overlap",
        stats.chunk_size, stats.chunk_overlap
    );
    let _ = writeln!(
        out,
        "  Vocabulary:  up to {} terms",
        stats.max_features
    );
    let _ = writeln!(
        out,
        "  Model:       {} (requested rank {})",
        colors::label(&stats.model_kind),
        stats.svd_components_requested
    );
    match (&stats.built_at, stats.build_duration_ms) {
        (Some(built_at), Some(ms)) => {
            let _ = writeln!(
                out,
                "  Built:       {} {}",
                built_at,
                colors::dim(&format!("({})", output::format_duration_ms(ms)))
            );
        }
        _ => {
            let _ = writeln!(out, "  Built:       {}", colors::dim("never"));
        }
    }
    out
}
