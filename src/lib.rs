//! kbsearch - Semantic search over a folder of markdown files
//!
//! An in-process index that loads markdown documents, splits them
//! into overlapping chunks, fits a TF-IDF (optionally LSA) vector
//! model and answers top-k similarity queries with deduplicated,
//! snippet-annotated results.
//!
//! # Architecture
//!
//! The codebase is organized into two main modules:
//!
//! - **core**: Domain logic (adapter-agnostic)
//!   - config, error, types
//!   - indexer (decoding, walking, chunking)
//!   - vector (TF-IDF, truncated SVD)
//!   - search (ranking, snippets)
//!   - store (generations, `KnowledgeBase`)
//!   - services (unified service container)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - Encoding fallback chain (UTF-8, cp1251, latin-1)
//! - UTF-8 safe paragraph chunking (character-based, never panics)
//! - Seeded randomized SVD, so rebuilds are reproducible
//! - Lock-light reads: queries run against an immutable snapshot
//!
//! # Example
//!
//! ```no_run
//! use kbsearch::{Config, KnowledgeBase};
//!
//! let kb = KnowledgeBase::new(Config::for_dir("./kb"));
//! kb.build()?;
//! let response = kb.search_default("quick fox")?;
//! for hit in response.results {
//!     println!("{} {:.3} {}", hit.doc_id, hit.score, hit.snippet);
//! }
//! # Ok::<(), kbsearch::KbError>(())
//! ```

// Core domain logic (adapter-agnostic)
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{KbError, Result};
pub use core::search::SearchParams;
pub use core::services::Services;
pub use core::store::KnowledgeBase;
pub use core::types::*;
