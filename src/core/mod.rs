//! Core domain logic (adapter-agnostic)
//!
//! This module contains all index logic that is independent of the
//! command-line front end.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain records and response shapes
//! - **indexer**: Decoding, file walking and chunking pipeline
//! - **vector**: TF-IDF and LSA vector models
//! - **search**: Similarity ranking and snippets
//! - **store**: Index generations and the `KnowledgeBase`
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod indexer;
pub mod search;
pub mod services;
pub mod store;
pub mod types;
pub mod vector;

// Re-export key types for convenience
pub use config::Config;
pub use error::{KbError, Result};
pub use services::Services;
pub use store::KnowledgeBase;
