//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a
//! specific CLI command, plus a human-readable renderer that the
//! interactive session reuses.

pub mod build;
pub mod completions;
pub mod config;
pub mod documents;
pub mod interactive;
pub mod search;
pub mod stats;

// Re-export argument types for use in mod.rs
pub use build::BuildArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use documents::{GetArgs, ListArgs};
pub use interactive::InteractiveArgs;
pub use search::SearchArgs;
pub use stats::StatsArgs;
