//! Paragraph-aware, UTF-8 safe text chunking.
//!
//! Paragraphs (separated by blank lines) are packed greedily into
//! chunks of at most `chunk_size` characters. A paragraph that is
//! longer than `chunk_size` on its own is sliced into fixed-size
//! windows that overlap by `overlap` characters.
//!
//! All sizes are measured in **characters**, not bytes. Slicing goes
//! through `char_indices()` so that window boundaries always fall on
//! valid character boundaries.
//!
//! # Example
//!
//! ```
//! use kbsearch::core::indexer::Chunker;
//!
//! let chunker = Chunker::new(40, 10).unwrap();
//! let chunks = chunker.split("First paragraph.\n\nSecond paragraph.");
//!
//! assert_eq!(chunks, vec!["First paragraph.\n\nSecond paragraph."]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::{KbError, Result};

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Separator placed between packed paragraphs
const PARAGRAPH_JOIN: &str = "\n\n";

/// Paragraph packing chunker.
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Maximum number of characters per chunk
    chunk_size: usize,

    /// Characters shared by consecutive windows of an oversized paragraph
    overlap: usize,
}

impl Chunker {
    /// Create a new chunker.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` - Maximum characters per chunk (must be > 0)
    /// * `overlap` - Window overlap; clamped to `[0, chunk_size - 1]`
    ///
    /// # Errors
    ///
    /// Returns `KbError::ConfigError` if `chunk_size` is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use kbsearch::core::indexer::Chunker;
    ///
    /// let chunker = Chunker::new(100, 500).unwrap();
    /// assert_eq!(chunker.chunk_size(), 100);
    /// assert_eq!(chunker.overlap(), 99);
    /// ```
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(KbError::ConfigError("chunk_size must be > 0".to_string()));
        }

        Ok(Self {
            chunk_size,
            overlap: overlap.min(chunk_size - 1),
        })
    }

    /// Get the chunk size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the effective (clamped) overlap in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split normalized text into chunk texts.
    ///
    /// Deterministic: the same input always yields the same chunks.
    /// Returns an empty vector when the text has no non-blank
    /// paragraph; the caller decides how to index such a document.
    ///
    /// The last chunk of a document is often shorter than
    /// `chunk_size`; packing never borrows text from the next document.
    pub fn split(&self, text: &str) -> Vec<String> {
        let paragraphs: Vec<&str> = PARAGRAPH_BREAK
            .split(text)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for paragraph in paragraphs {
            let paragraph_len = paragraph.chars().count();

            // Length of current + separator + paragraph
            let candidate_len = if current.is_empty() {
                paragraph_len
            } else {
                current_len + PARAGRAPH_JOIN.len() + paragraph_len
            };

            if candidate_len <= self.chunk_size {
                if !current.is_empty() {
                    current.push_str(PARAGRAPH_JOIN);
                }
                current.push_str(paragraph);
                current_len = candidate_len;
                continue;
            }

            Self::flush(&mut chunks, &mut current);
            current_len = 0;

            if paragraph_len <= self.chunk_size {
                current.push_str(paragraph);
                current_len = paragraph_len;
                continue;
            }

            self.slice_windows(paragraph, &mut chunks);
        }

        Self::flush(&mut chunks, &mut current);

        chunks
    }

    /// Emit the pending buffer as a chunk (if it has content) and reset it
    fn flush(chunks: &mut Vec<String>, current: &mut String) {
        let trimmed = current.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
        current.clear();
    }

    /// Slice an oversized paragraph into overlapping windows.
    ///
    /// Collects character indices (byte offset, char) so that every
    /// slice lands on a character boundary.
    fn slice_windows(&self, paragraph: &str, chunks: &mut Vec<String>) {
        let char_indices: Vec<(usize, char)> = paragraph.char_indices().collect();

        // Step = chunk_size - overlap, but always advance at least 1
        // character to prevent infinite loops
        let step = self.chunk_size.saturating_sub(self.overlap).max(1);

        let mut char_start_idx = 0;
        while char_start_idx < char_indices.len() {
            let char_end_idx = (char_start_idx + self.chunk_size).min(char_indices.len());

            let byte_start = char_indices[char_start_idx].0;
            let byte_end = if char_end_idx < char_indices.len() {
                char_indices[char_end_idx].0
            } else {
                paragraph.len() // End of string
            };

            let window = paragraph[byte_start..byte_end].trim();
            if !window.is_empty() {
                chunks.push(window.to_string());
            }

            char_start_idx += step;
        }
    }
}
