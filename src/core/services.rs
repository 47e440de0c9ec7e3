//! Unified service container for kbsearch
//!
//! Provides shared access to the index and its configuration.

use crate::core::config::Config;
use crate::core::store::KnowledgeBase;
use std::sync::Arc;

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// The knowledge base index
    pub kb: Arc<KnowledgeBase>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Self {
        let kb = Arc::new(KnowledgeBase::new(config.clone()));

        Self {
            kb,
            config: Arc::new(config),
        }
    }
}
