//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Execute the config command
pub fn execute(
    _args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config: &Config = &services.config;

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  index:");
            println!("    kb_dir: {}", services.kb.kb_dir().display());
            println!("    chunk_size: {}", config.index.chunk_size);
            println!("    chunk_overlap: {}", config.index.chunk_overlap);
            println!("    max_features: {}", config.index.max_features);
            println!("    svd_components: {}", config.index.svd_components);
            println!("  search:");
            println!("    default_top_k: {}", config.search.default_top_k);
            println!("    default_min_score: {}", config.search.default_min_score);
            println!("    deduplicate_docs: {}", config.search.deduplicate_docs);
            println!("    default_list_limit: {}", config.search.default_list_limit);
            println!("    default_max_chars: {}", config.search.default_max_chars);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
    }

    Ok(())
}
