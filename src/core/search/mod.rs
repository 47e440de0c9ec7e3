//! Search module for similarity queries.
//!
//! This module ranks the chunks of an index generation against a
//! query and formats each kept hit with a query-anchored snippet.

pub mod engine;
pub mod snippet;

pub use engine::{SearchParams, EMPTY_QUERY_ERROR, MAX_TOP_K};
