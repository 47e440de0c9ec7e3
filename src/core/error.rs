//! Error types and error handling for the kbsearch index.
//!
//! This module defines the error types used throughout the
//! crate. User-input conditions (empty query, unknown document id)
//! are not errors: they are reported as structured negative results
//! by the operations themselves.

use thiserror::Error;

/// Result type alias for kbsearch operations
pub type Result<T> = std::result::Result<T, KbError>;

/// Main error type for the knowledge base index
#[derive(Error, Debug)]
pub enum KbError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Knowledge base folder not found: {0}")]
    DirectoryNotFound(String),

    #[error("No .md files found in {0}")]
    NoDocuments(String),

    #[error("Cannot fit a vector model on an empty corpus")]
    EmptyCorpus,

    #[error("Index is not built yet. Call build() first.")]
    IndexNotBuilt,

    #[error("Missing dependency for semantic search: {0}")]
    MissingDependency(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl KbError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error comes from configuration or corpus setup
    /// (fatal to `build()`, never retried)
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            KbError::ConfigError(_)
                | KbError::DirectoryNotFound(_)
                | KbError::NoDocuments(_)
                | KbError::EmptyCorpus
        )
    }

    /// Check if this is the "index not built" condition
    pub fn is_not_ready(&self) -> bool {
        matches!(self, KbError::IndexNotBuilt)
    }

    /// Check if this is an installation problem rather than a runtime fault
    pub fn is_setup_error(&self) -> bool {
        matches!(self, KbError::MissingDependency(_))
    }
}
