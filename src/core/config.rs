//! Configuration management for the kbsearch index.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//! Values are read once when the index is constructed; changing them
//! requires a new `KnowledgeBase` and a full rebuild.

use crate::core::error::{KbError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Application name used for the XDG config directory
pub const APP_NAME: &str = "kbsearch";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Index build configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    /// Folder containing the `.md` source files
    #[serde(default = "default_kb_dir")]
    pub kb_dir: PathBuf,

    /// Characters per chunk (not bytes!)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Character overlap between windows of an oversized paragraph
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Vocabulary cap for the term-weighting model
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Requested rank of the LSA projection
    #[serde(default = "default_svd_components")]
    pub svd_components: usize,
}

/// Query defaults used by the adapters when the caller omits a value
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Default number of results to return
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Default similarity floor
    #[serde(default = "default_min_score")]
    pub default_min_score: f64,

    /// Keep only the best chunk of each document
    #[serde(default = "default_deduplicate_docs")]
    pub deduplicate_docs: bool,

    /// Default page size for document listings
    #[serde(default = "default_list_limit")]
    pub default_list_limit: usize,

    /// Default content cap for document retrieval
    #[serde(default = "default_max_chars")]
    pub default_max_chars: usize,
}

// Default value functions
fn default_kb_dir() -> PathBuf {
    PathBuf::from("./kb")
}

fn default_chunk_size() -> usize {
    1400
}

fn default_chunk_overlap() -> usize {
    250
}

fn default_max_features() -> usize {
    25_000
}

fn default_svd_components() -> usize {
    256
}

fn default_top_k() -> usize {
    5
}

fn default_min_score() -> f64 {
    0.08
}

fn default_deduplicate_docs() -> bool {
    true
}

fn default_list_limit() -> usize {
    20
}

fn default_max_chars() -> usize {
    4000
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            kb_dir: default_kb_dir(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            max_features: default_max_features(),
            svd_components: default_svd_components(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            default_min_score: default_min_score(),
            deduplicate_docs: default_deduplicate_docs(),
            default_list_limit: default_list_limit(),
            default_max_chars: default_max_chars(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| KbError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Default configuration pointed at a knowledge base folder
    pub fn for_dir(kb_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.index.kb_dir = kb_dir.into();
        config
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let config_dir = dirs::config_dir().map(|d| d.join(APP_NAME));
        Self::load_with_config_dir(config_dir.as_deref())
    }

    /// Load config with an explicit config directory
    ///
    /// Priority order for the file:
    /// 1. KBSEARCH_CONFIG env var
    /// 2. `{config_dir}/config.toml` (XDG, e.g. ~/.config/kbsearch)
    /// 3. ./kbsearch.toml
    /// 4. Defaults
    pub fn load_with_config_dir(config_dir: Option<&Path>) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("KBSEARCH_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = config_dir.map(|d| d.join("config.toml"));
            match xdg_config {
                Some(path) if path.exists() => Self::from_file(path)?,
                _ if Path::new("kbsearch.toml").exists() => Self::from_file("kbsearch.toml")?,
                _ => Self::default(),
            }
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(kb_dir) = env::var("KBSEARCH_KB_DIR") {
            self.index.kb_dir = PathBuf::from(kb_dir);
        }
        if let Ok(chunk_size) = env::var("KBSEARCH_CHUNK_SIZE") {
            if let Ok(size) = chunk_size.parse() {
                self.index.chunk_size = size;
            }
        }
        if let Ok(overlap) = env::var("KBSEARCH_CHUNK_OVERLAP") {
            if let Ok(o) = overlap.parse() {
                self.index.chunk_overlap = o;
            }
        }
        if let Ok(max_features) = env::var("KBSEARCH_MAX_FEATURES") {
            if let Ok(n) = max_features.parse() {
                self.index.max_features = n;
            }
        }
        if let Ok(components) = env::var("KBSEARCH_SVD_COMPONENTS") {
            if let Ok(n) = components.parse() {
                self.index.svd_components = n;
            }
        }

        if let Ok(top_k) = env::var("KBSEARCH_DEFAULT_TOP_K") {
            if let Ok(k) = top_k.parse() {
                self.search.default_top_k = k;
            }
        }
        if let Ok(min_score) = env::var("KBSEARCH_MIN_SCORE") {
            if let Ok(s) = min_score.parse() {
                self.search.default_min_score = s;
            }
        }
    }

    /// Validate configuration values
    ///
    /// Overlap is not checked here; the chunker clamps it.
    pub fn validate(&self) -> Result<()> {
        if self.index.chunk_size == 0 {
            return Err(KbError::ConfigError("chunk_size must be > 0".to_string()));
        }

        if self.index.max_features == 0 {
            return Err(KbError::ConfigError("max_features must be > 0".to_string()));
        }

        if self.search.default_top_k == 0 {
            return Err(KbError::ConfigError("Default top_k must be non-zero".to_string()));
        }

        if !self.search.default_min_score.is_finite() {
            return Err(KbError::ConfigError(
                "Default min_score must be a finite number".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Knowledge base dir: {:?}", self.index.kb_dir);
        tracing::info!("  Chunk size: {} chars", self.index.chunk_size);
        tracing::info!("  Chunk overlap: {} chars", self.index.chunk_overlap);
        tracing::info!("  Max features: {}", self.index.max_features);
        tracing::info!("  SVD components: {}", self.index.svd_components);
        tracing::info!("  Default top_k: {}", self.search.default_top_k);
        tracing::info!("  Default min_score: {}", self.search.default_min_score);
        tracing::info!("  Deduplicate docs: {}", self.search.deduplicate_docs);
    }
}
