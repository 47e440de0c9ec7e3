//! The knowledge base index.
//!
//! `KnowledgeBase` owns the configuration and the current generation.
//! Readers take the lock only long enough to clone the generation
//! `Arc`, so queries never block on a running build. Builds do all
//! their loading, chunking and fitting outside the lock and hold it
//! only for the swap; when builds overlap, the last swap wins.

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use crate::core::config::Config;
use crate::core::error::{KbError, Result};
use crate::core::indexer::IndexingPipeline;
use crate::core::search::{engine, SearchParams};
use crate::core::store::Generation;
use crate::core::types::{
    DocumentDetail, DocumentLookup, DocumentPage, DocumentSummary, IndexStats, SearchResponse,
};
use crate::core::vector::{self, ModelKind, ModelParams, VectorModel};

/// Bounds for `list_documents` page size
pub const MIN_LIST_LIMIT: usize = 1;
pub const MAX_LIST_LIMIT: usize = 200;

/// Bounds for `get_document` content length
pub const MIN_MAX_CHARS: usize = 200;
pub const MAX_MAX_CHARS: usize = 200_000;

/// In-memory semantic search index over a folder of markdown files
pub struct KnowledgeBase {
    config: Config,

    /// Resolved knowledge base folder
    kb_dir: PathBuf,

    /// Current generation; `None` until the first successful build
    current: RwLock<Option<Arc<Generation>>>,
}

impl KnowledgeBase {
    /// Create an index over `config.index.kb_dir`
    ///
    /// Nothing is read from disk until `build()`.
    pub fn new(config: Config) -> Self {
        let kb_dir = resolve_dir(&config.index.kb_dir);

        Self {
            config,
            kb_dir,
            current: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolved knowledge base folder
    pub fn kb_dir(&self) -> &Path {
        &self.kb_dir
    }

    /// Snapshot of the current generation
    pub fn current(&self) -> Option<Arc<Generation>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether a generation is available
    pub fn is_built(&self) -> bool {
        self.current().is_some()
    }

    fn model_params(&self) -> ModelParams {
        ModelParams {
            max_features: self.config.index.max_features,
            svd_components: self.config.index.svd_components,
        }
    }

    /// Rebuild the whole index from the folder
    ///
    /// On failure the previous generation (if any) stays in place.
    ///
    /// # Errors
    ///
    /// * `KbError::MissingDependency` if the configured model is not compiled in
    /// * `KbError::ConfigError` for a zero `chunk_size`
    /// * `KbError::DirectoryNotFound` / `KbError::NoDocuments` for an unusable folder
    /// * `KbError::EmptyCorpus` if no chunk contains a single term
    pub fn build(&self) -> Result<IndexStats> {
        let start = Instant::now();
        let params = self.model_params();

        // Step 1: Capability check before touching the folder
        vector::ensure_available(&params)?;

        // Step 2: Load and chunk documents
        let pipeline = IndexingPipeline::new(
            self.config.index.chunk_size,
            self.config.index.chunk_overlap,
        )?;
        let (documents, chunks) = pipeline.run(&self.kb_dir)?;

        // Step 3: Fit the vector model
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let model = VectorModel::fit(&texts, &params)?;

        let build_duration_ms = start.elapsed().as_millis() as u64;
        let generation = Arc::new(Generation::new(
            documents,
            chunks,
            model,
            Utc::now(),
            build_duration_ms,
        ));

        // Step 4: Swap
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Arc::clone(&generation));

        tracing::info!(
            "Index built: {} documents, {} chunks, model {} in {}ms",
            generation.documents().len(),
            generation.chunks.len(),
            generation.model_kind(),
            build_duration_ms
        );

        Ok(self.stats_for(Some(generation.as_ref())))
    }

    /// Statistics of the current generation (safe before the first build)
    pub fn stats(&self) -> IndexStats {
        self.stats_for(self.current().as_deref())
    }

    fn stats_for(&self, generation: Option<&Generation>) -> IndexStats {
        IndexStats {
            kb_dir: self.kb_dir.display().to_string(),
            documents_count: generation.map_or(0, |g| g.documents().len()),
            chunks_count: generation.map_or(0, |g| g.chunks.len()),
            total_chars: generation.map_or(0, Generation::total_chars),
            chunk_size: self.config.index.chunk_size,
            chunk_overlap: self.config.index.chunk_overlap,
            max_features: self.config.index.max_features,
            svd_components_requested: self.config.index.svd_components,
            model_kind: generation
                .map_or(ModelKind::Uninitialized, Generation::model_kind)
                .to_string(),
            built_at: generation.map(Generation::built_at_string),
            build_duration_ms: generation.map(|g| g.build_duration_ms),
        }
    }

    /// Page through documents in `doc_id` order
    ///
    /// # Arguments
    ///
    /// * `limit` - Page size, clamped to `[1, 200]`
    /// * `offset` - Documents to skip
    /// * `name_contains` - Case-insensitive substring of `doc_id` or title,
    ///   applied before paging
    pub fn list_documents(
        &self,
        limit: usize,
        offset: usize,
        name_contains: Option<&str>,
    ) -> DocumentPage {
        let limit = limit.clamp(MIN_LIST_LIMIT, MAX_LIST_LIMIT);
        let generation = self.current();
        let documents = generation.as_deref().map_or(&[][..], Generation::documents);

        let needle = name_contains
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase);
        let matching: Vec<_> = documents
            .iter()
            .filter(|doc| match &needle {
                Some(needle) => {
                    doc.doc_id.to_lowercase().contains(needle.as_str())
                        || doc.title.to_lowercase().contains(needle.as_str())
                }
                None => true,
            })
            .collect();

        DocumentPage {
            total: matching.len(),
            offset,
            limit,
            items: matching
                .into_iter()
                .skip(offset)
                .take(limit)
                .map(DocumentSummary::from)
                .collect(),
        }
    }

    /// Fetch one document
    ///
    /// Unknown ids (and any id before the first build) give a not-found
    /// result. Content longer than `max_chars` (clamped to
    /// `[200, 200000]`) is cut and flagged.
    pub fn get_document(
        &self,
        doc_id: &str,
        include_content: bool,
        max_chars: usize,
    ) -> DocumentLookup {
        let generation = self.current();
        let Some(doc) = generation.as_deref().and_then(|g| g.document(doc_id)) else {
            return DocumentLookup::not_found(doc_id);
        };

        let max_chars = max_chars.clamp(MIN_MAX_CHARS, MAX_MAX_CHARS);
        let content_length = doc.content_length();
        let content_truncated = include_content && content_length > max_chars;
        let content = include_content.then(|| {
            if content_truncated {
                doc.content.chars().take(max_chars).collect()
            } else {
                doc.content.clone()
            }
        });

        DocumentLookup::found(DocumentDetail {
            doc_id: doc.doc_id.clone(),
            title: doc.title.clone(),
            path: doc.path.clone(),
            size_bytes: doc.size_bytes,
            content_length,
            content,
            content_truncated,
        })
    }

    /// Rank chunks against a query
    ///
    /// A blank query is answered with an empty result and an error
    /// message, even before the first build.
    ///
    /// # Errors
    ///
    /// `KbError::IndexNotBuilt` if no generation exists yet.
    pub fn search(&self, query: &str, params: SearchParams) -> Result<SearchResponse> {
        let generation = self.current();

        if query.trim().is_empty() {
            let kind = generation
                .as_deref()
                .map_or(ModelKind::Uninitialized, Generation::model_kind);
            return Ok(engine::empty_query_response(query, params, kind.to_string()));
        }

        let generation = generation.ok_or(KbError::IndexNotBuilt)?;
        Ok(engine::search(&generation, query, params))
    }

    /// Search with the configured defaults
    pub fn search_default(&self, query: &str) -> Result<SearchResponse> {
        self.search(query, self.default_search_params())
    }

    pub fn default_search_params(&self) -> SearchParams {
        SearchParams {
            top_k: self.config.search.default_top_k,
            min_score: self.config.search.default_min_score,
            deduplicate_docs: self.config.search.deduplicate_docs,
        }
    }
}

/// Absolute, symlink-free form of `dir` when it exists
fn resolve_dir(dir: &Path) -> PathBuf {
    fs::canonicalize(dir)
        .or_else(|_| std::path::absolute(dir))
        .unwrap_or_else(|_| dir.to_path_buf())
}
