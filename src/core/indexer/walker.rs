//! Knowledge base folder walker.
//!
//! Only the top level of the folder is scanned: markdown files in
//! subdirectories are not part of the knowledge base. Results are
//! sorted by path so that builds are reproducible.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::error::{KbError, Result};

/// Pattern matched against file names
pub const MARKDOWN_PATTERN: &str = "*.md";

/// Flat directory walker with a file name pattern
pub struct FileWalker {
    /// Pattern the file name must match (e.g. "*.md")
    pattern: Pattern,
}

impl FileWalker {
    /// Create a new file walker
    ///
    /// # Arguments
    ///
    /// * `pattern` - Glob pattern matched against the file name
    ///
    /// # Returns
    ///
    /// A new `FileWalker` instance or an error if the pattern is
    /// invalid
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern)
            .map_err(|e| KbError::ConfigError(format!("Invalid file pattern '{pattern}': {e}")))?;

        Ok(Self { pattern })
    }

    /// Walker for `*.md` files
    pub fn markdown() -> Result<Self> {
        Self::new(MARKDOWN_PATTERN)
    }

    /// Collect matching regular files directly inside `root`
    ///
    /// # Arguments
    ///
    /// * `root` - Folder to scan (not recursed into)
    ///
    /// # Returns
    ///
    /// Matching file paths in sorted order. Unreadable entries are
    /// logged and skipped.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let matches = entry
                        .file_name()
                        .to_str()
                        .map(|name| self.pattern.matches(name))
                        .unwrap_or(false);

                    if matches {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                }
            }
        }

        files.sort();
        Ok(files)
    }
}
