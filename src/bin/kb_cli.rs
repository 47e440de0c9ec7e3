//! kb - Command-line interface for kbsearch
//!
//! Indexes a folder of markdown files in memory and answers semantic
//! search queries against it.
//!
//! # Examples
//!
//! ```bash
//! # Build the index and show statistics
//! kb --kb-dir ./kb stats
//!
//! # Search
//! kb --kb-dir ./kb search "password reset" -k 3
//!
//! # Browse documents
//! kb --kb-dir ./kb list-documents --name faq
//! kb --kb-dir ./kb get-document faq.md --max-chars 1000
//!
//! # Keep one index in memory for many queries
//! kb --kb-dir ./kb interactive
//! ```

use clap::Parser;
use kbsearch::cli::{output, run, Cli};
use tracing_subscriber::EnvFilter;

/// `KBSEARCH_LOG_JSON` turns on JSON log lines only for a truthy value
fn json_logs_enabled(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kbsearch=warn"));
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr) // stdout carries command output
        .with_env_filter(filter)
        .with_ansi(false);

    if json_logs_enabled(std::env::var("KBSEARCH_LOG_JSON").ok().as_deref()) {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
