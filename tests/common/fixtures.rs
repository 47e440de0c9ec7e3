// Test fixtures for integration testing

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Knowledge base folder fixture backed by a temporary directory
#[allow(dead_code)] // Used in integration tests
pub struct TestKb {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

impl TestKb {
    /// Three small documents; B.md and C.md share vocabulary, A.md shares none
    #[allow(dead_code)] // Used in integration tests
    pub fn standard() -> Self {
        Self::with_files(&[
            (
                "A.md",
                "# Quick Fox\n\nQuick brown fox jumps over a lazy dog. \
                 A quick fox is a happy fox.",
            ),
            (
                "B.md",
                "# Lorem\n\nLorem ipsum dolor sit amet. The backing store keeps \
                 consistent data.",
            ),
            (
                "C.md",
                "# Caching\n\nA write-through cache keeps the backing store consistent \
                 with every update.",
            ),
        ])
    }

    /// `count` generated documents with overlapping vocabulary
    #[allow(dead_code)] // Used in integration tests
    pub fn generated(count: usize) -> Self {
        let topics = ["rust", "search", "cache", "index", "vector", "query"];
        let files: Vec<(String, String)> = (0..count)
            .map(|i| {
                let topic = topics[i % topics.len()];
                let content = format!(
                    "# Note {i:03} about {topic}\n\n\
                     This note talks about {topic} and {other}.\n\n\
                     Paragraph {i:03} repeats {topic} {topic} for weight.",
                    other = topics[(i + 1) % topics.len()],
                );
                (format!("note_{i:03}.md"), content)
            })
            .collect();

        let specs: Vec<(&str, &str)> = files
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str()))
            .collect();
        Self::with_files(&specs)
    }

    /// Create with custom text files
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();

        for (name, content) in files {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            paths.push(path);
        }

        Self { dir, files: paths }
    }

    /// Write raw bytes (for encoding tests)
    #[allow(dead_code)] // Used in integration tests
    pub fn write_bytes(&mut self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        self.files.push(path.clone());
        path
    }

    /// Write or overwrite a text file
    #[allow(dead_code)] // Used in integration tests
    pub fn write(&mut self, name: &str, content: &str) -> PathBuf {
        self.write_bytes(name, content.as_bytes())
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
