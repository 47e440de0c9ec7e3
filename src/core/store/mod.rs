//! In-memory index store.
//!
//! - **Generation**: immutable snapshot produced by one build
//! - **KnowledgeBase**: owns the current generation and exposes the
//!   build, stats, listing, retrieval and search operations

mod generation;
mod knowledge_base;

pub use generation::{Generation, BUILT_AT_FORMAT};
pub use knowledge_base::{
    KnowledgeBase, MAX_LIST_LIMIT, MAX_MAX_CHARS, MIN_LIST_LIMIT, MIN_MAX_CHARS,
};
