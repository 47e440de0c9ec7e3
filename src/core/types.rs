//! Core data types for the kbsearch index.
//!
//! This module defines the records held by an index generation and
//! the response shapes returned by the index operations. All response
//! types serialize to the JSON objects the adapters print.

use serde::{Deserialize, Serialize};

/// A loaded markdown document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique id: the source file name (e.g. `intro.md`)
    pub doc_id: String,

    /// Absolute source path
    pub path: String,

    /// Human-readable title derived from the content
    pub title: String,

    /// Size of the source file on disk
    pub size_bytes: u64,

    /// Normalized text content
    pub content: String,
}

impl Document {
    /// Content length in characters
    pub fn content_length(&self) -> usize {
        self.content.chars().count()
    }
}

/// A single text chunk from a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// `{doc_id}::chunk-{chunk_index}`
    pub chunk_id: String,

    /// Owning document
    pub doc_id: String,

    /// Sequential chunk number within the document
    pub chunk_index: usize,

    /// The actual text content
    pub text: String,
}

impl Chunk {
    pub fn new(doc_id: &str, chunk_index: usize, text: String) -> Self {
        Self {
            chunk_id: format!("{doc_id}::chunk-{chunk_index}"),
            doc_id: doc_id.to_string(),
            chunk_index,
            text,
        }
    }
}

/// Statistics for the current index generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Resolved knowledge base folder
    pub kb_dir: String,

    pub documents_count: usize,
    pub chunks_count: usize,

    /// Sum of document content lengths in characters
    pub total_chars: usize,

    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub max_features: usize,
    pub svd_components_requested: usize,

    /// `uninitialized`, `tfidf` or `lsa_tfidf_svd_{rank}`
    pub model_kind: String,

    /// Build timestamp (`%Y-%m-%dT%H:%M:%SZ`), `None` before the first build
    pub built_at: Option<String>,

    pub build_duration_ms: Option<u64>,
}

/// Document metadata without its content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub doc_id: String,
    pub title: String,
    pub path: String,
    pub size_bytes: u64,
    pub content_length: usize,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            doc_id: doc.doc_id.clone(),
            title: doc.title.clone(),
            path: doc.path.clone(),
            size_bytes: doc.size_bytes,
            content_length: doc.content_length(),
        }
    }
}

/// One page of the document listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentPage {
    /// Number of documents matching the filter (before paging)
    pub total: usize,

    /// Applied offset
    pub offset: usize,

    /// Applied limit
    pub limit: usize,

    pub items: Vec<DocumentSummary>,
}

/// Full document metadata with optional (possibly truncated) content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDetail {
    pub doc_id: String,
    pub title: String,
    pub path: String,
    pub size_bytes: u64,
    pub content_length: usize,
    pub content: Option<String>,
    pub content_truncated: bool,
}

/// Result of a document lookup by id
///
/// An unknown id is a normal outcome (`found == false`), not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLookup {
    pub found: bool,

    /// Requested id
    pub doc_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentDetail>,
}

impl DocumentLookup {
    pub fn found(document: DocumentDetail) -> Self {
        Self {
            found: true,
            doc_id: document.doc_id.clone(),
            document: Some(document),
        }
    }

    pub fn not_found(doc_id: &str) -> Self {
        Self {
            found: false,
            doc_id: doc_id.to_string(),
            document: None,
        }
    }
}

/// A ranked chunk returned by a search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub chunk_id: String,
    pub doc_id: String,

    /// Title of the owning document
    pub title: String,

    pub chunk_index: usize,

    /// Cosine similarity rounded to 6 decimal places
    pub score: f64,

    /// Query-anchored excerpt of the chunk
    pub snippet: String,

    /// Source path of the owning document
    pub path: String,
}

/// Response from a search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Trimmed query string
    pub query: String,

    /// Applied (clamped) result limit
    pub top_k: usize,

    /// Applied (clamped) similarity floor
    pub min_score: f64,

    pub deduplicate_docs: bool,

    /// Model kind of the generation that answered
    pub model_kind: String,

    pub results_count: usize,
    pub results: Vec<SearchHit>,

    /// Explanation when the query could not be run (e.g. empty query)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
