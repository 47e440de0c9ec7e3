//! Immutable index generation.
//!
//! A generation is everything one build produced. It is never mutated
//! after construction; a rebuild creates a new generation and swaps
//! it in whole.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::core::types::{Chunk, Document};
use crate::core::vector::{ModelKind, VectorModel};

/// Timestamp format reported in stats
pub const BUILT_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One complete, consistent index snapshot
#[derive(Debug)]
pub struct Generation {
    /// Documents ordered by `doc_id`
    documents: Vec<Document>,

    /// `doc_id` -> position in `documents`
    by_id: HashMap<String, usize>,

    /// Chunks; chunk `i` is row `i` of the model
    pub chunks: Vec<Chunk>,

    pub model: VectorModel,

    pub built_at: DateTime<Utc>,

    pub build_duration_ms: u64,
}

impl Generation {
    /// Assemble a generation
    ///
    /// `model` must have been fitted on `chunks` in order.
    pub fn new(
        mut documents: Vec<Document>,
        chunks: Vec<Chunk>,
        model: VectorModel,
        built_at: DateTime<Utc>,
        build_duration_ms: u64,
    ) -> Self {
        debug_assert_eq!(model.n_rows(), chunks.len());

        documents.sort_by(|a, b| a.doc_id.cmp(&b.doc_id));
        let by_id = documents
            .iter()
            .enumerate()
            .map(|(idx, doc)| (doc.doc_id.clone(), idx))
            .collect();

        Self {
            documents,
            by_id,
            chunks,
            model,
            built_at,
            build_duration_ms,
        }
    }

    /// Documents in `doc_id` order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Look up a document by id
    pub fn document(&self, doc_id: &str) -> Option<&Document> {
        self.by_id.get(doc_id).map(|&idx| &self.documents[idx])
    }

    pub fn model_kind(&self) -> ModelKind {
        self.model.kind()
    }

    /// Sum of document lengths in characters
    pub fn total_chars(&self) -> usize {
        self.documents.iter().map(Document::content_length).sum()
    }

    /// Build time formatted for stats
    pub fn built_at_string(&self) -> String {
        self.built_at.format(BUILT_AT_FORMAT).to_string()
    }
}
