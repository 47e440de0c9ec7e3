//! Search command - query the knowledge base

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::search::SearchParams;
use crate::core::services::Services;
use crate::core::types::SearchResponse;
use clap::Args;
use std::fmt::Write;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-text search query
    pub query: String,

    /// Maximum number of results (1-50)
    #[arg(long = "top-k", short = 'k')]
    pub top_k: Option<usize>,

    /// Minimum cosine similarity (-1 to 1)
    #[arg(long, allow_hyphen_values = true)]
    pub min_score: Option<f64>,

    /// Return every matching chunk instead of the best chunk per document
    #[arg(long)]
    pub all_chunks: bool,
}

impl SearchArgs {
    /// Resolve parameters against the configured defaults
    pub fn params(&self, services: &Services) -> SearchParams {
        let defaults = services.kb.default_search_params();
        SearchParams {
            top_k: self.top_k.unwrap_or(defaults.top_k),
            min_score: self.min_score.unwrap_or(defaults.min_score),
            deduplicate_docs: defaults.deduplicate_docs && !self.all_chunks,
        }
    }
}

/// Execute the search command
pub fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    services.kb.build()?;

    let response = services.kb.search(&args.query, args.params(services))?;
    output::emit(&response, format, render)?;

    Ok(())
}

/// Human-readable result list
pub fn render(response: &SearchResponse) -> String {
    let mut out = String::new();

    if let Some(error) = &response.error {
        let _ = writeln!(out, "{}: {}", colors::warning("Warning"), error);
        return out;
    }

    if response.results.is_empty() {
        let _ = writeln!(
            out,
            "No results found for '{}' {}",
            colors::label(&response.query),
            colors::dim(&format!("(min score {})", response.min_score))
        );
        return out;
    }

    let _ = writeln!(
        out,
        "Found {} result(s) {}:\n",
        colors::number(&response.results_count.to_string()),
        colors::dim(&format!("[{}]", response.model_kind))
    );

    for (i, hit) in response.results.iter().enumerate() {
        let _ = writeln!(
            out,
            "[{}] {} {} {}",
            colors::rank(&(i + 1).to_string()),
            colors::doc_id(&hit.doc_id),
            colors::label(&hit.title),
            colors::score(&format!("(score: {:.3})", hit.score))
        );
        let _ = writeln!(
            out,
            "    {}",
            colors::dim(&format!("{} #{}", hit.path, hit.chunk_index))
        );
        let _ = writeln!(out, "    {}\n", hit.snippet);
    }

    out
}
