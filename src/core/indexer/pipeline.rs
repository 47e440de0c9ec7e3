//! Indexing pipeline orchestration.
//!
//! Coordinates the document side of a build:
//! 1. Walk the knowledge base folder
//! 2. Decode and normalize each file
//! 3. Derive titles
//! 4. Chunk every document

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::core::error::{KbError, Result};
use crate::core::indexer::{text, Chunker, FileWalker};
use crate::core::types::{Chunk, Document};

/// Orchestrates the document loading and chunking pipeline
pub struct IndexingPipeline {
    walker: FileWalker,
    chunker: Chunker,
}

impl IndexingPipeline {
    /// Create a new indexing pipeline
    ///
    /// # Arguments
    ///
    /// * `chunk_size` - Size of chunks in characters
    /// * `overlap` - Overlap between windows in characters
    ///
    /// # Returns
    ///
    /// A new `IndexingPipeline` instance, or a configuration error if
    /// `chunk_size` is 0
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        let walker = FileWalker::markdown()?;
        let chunker = Chunker::new(chunk_size, overlap)?;

        Ok(Self { walker, chunker })
    }

    /// Load documents and chunk them
    ///
    /// # Returns
    ///
    /// A tuple of (documents, chunks) or an error if the folder is
    /// missing or holds no usable document
    pub fn run(&self, root: &Path) -> Result<(Vec<Document>, Vec<Chunk>)> {
        let start = Instant::now();

        let documents = self.load_documents(root)?;
        let chunks = self.chunk_documents(&documents);

        tracing::info!(
            "Loaded {} documents into {} chunks in {}ms",
            documents.len(),
            chunks.len(),
            start.elapsed().as_millis()
        );

        Ok((documents, chunks))
    }

    /// Load every `*.md` file directly inside `root`
    ///
    /// Files whose normalized content is empty are skipped. Errors
    /// reading individual files are logged but don't stop the process.
    pub fn load_documents(&self, root: &Path) -> Result<Vec<Document>> {
        if !root.is_dir() {
            return Err(KbError::DirectoryNotFound(root.display().to_string()));
        }

        // Step 1: Collect files
        tracing::info!("Scanning knowledge base folder {:?}", root);
        let files = self.walker.collect_files(root)?;
        tracing::info!("Found {} markdown files", files.len());

        if files.is_empty() {
            return Err(KbError::NoDocuments(root.display().to_string()));
        }

        // Step 2: Read and normalize files
        let mut documents = Vec::with_capacity(files.len());
        for file_path in &files {
            match Self::load_document(file_path) {
                Ok(Some(doc)) => documents.push(doc),
                Ok(None) => {
                    tracing::debug!("Skipping empty document: {:?}", file_path);
                }
                Err(e) => {
                    tracing::warn!("Failed to load {:?}: {}", file_path, e);
                }
            }
        }

        if documents.is_empty() {
            return Err(KbError::NoDocuments(root.display().to_string()));
        }

        Ok(documents)
    }

    /// Chunk documents in order
    ///
    /// A document that yields no chunk contributes its whole content
    /// as a single chunk, so every document is searchable.
    pub fn chunk_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        let mut all_chunks = Vec::new();

        for doc in documents {
            let mut texts = self.chunker.split(&doc.content);
            if texts.is_empty() {
                texts.push(doc.content.clone());
            }

            tracing::debug!("Chunked {} ({} chunks)", doc.doc_id, texts.len());

            all_chunks.extend(
                texts
                    .into_iter()
                    .enumerate()
                    .map(|(idx, text)| Chunk::new(&doc.doc_id, idx, text)),
            );
        }

        all_chunks
    }

    /// Process a single file: decode, normalize, derive the title
    fn load_document(path: &Path) -> Result<Option<Document>> {
        let content = text::normalize(&text::load(path)?);
        if content.is_empty() {
            return Ok(None);
        }

        let doc_id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| doc_id.clone());

        let size_bytes = fs::metadata(path)?.len();
        let resolved = fs::canonicalize(path)?;

        Ok(Some(Document {
            title: text::extract_title(&content, &stem),
            doc_id,
            path: resolved.display().to_string(),
            size_bytes,
            content,
        }))
    }
}
