//! Document indexing module.
//!
//! Handles decoding, chunking and file traversal for building the
//! knowledge base index. Key features:
//!
//! - Encoding fallback chain (never fails to produce text)
//! - Paragraph-aware, UTF-8 safe character-based chunking
//! - Flat folder walking with a file name pattern
//! - Indexing pipeline orchestration
//!
//! # Safety
//!
//! The chunker uses character-based slicing via `char_indices()`
//! to ensure UTF-8 safety. This prevents panics when processing
//! files containing emojis, Cyrillic or other multi-byte text.

pub mod chunker;
pub mod pipeline;
pub mod text;
pub mod walker;

pub use chunker::Chunker;
pub use pipeline::IndexingPipeline;
pub use walker::FileWalker;
