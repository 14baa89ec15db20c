//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with in-memory implementations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Producer of the words a benchmark loads into its containers.
pub trait WordSource: Send + Sync {
    /// Load all words, in source order.
    fn load(&self) -> io::Result<Vec<String>>;

    /// Human-readable origin, used in reports and error context.
    fn describe(&self) -> String;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Whitespace-separated word list on disk.
#[derive(Debug, Clone)]
pub struct FileWordSource {
    path: PathBuf,
}

impl FileWordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WordSource for FileWordSource {
    fn load(&self) -> io::Result<Vec<String>> {
        let contents = fs::read_to_string(&self.path)?;
        let words: Vec<String> = contents.split_whitespace().map(str::to_string).collect();
        debug!("load: {} words from {}", words.len(), self.path.display());
        Ok(words)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory word list.
#[derive(Debug, Clone, Default)]
pub struct StaticWordSource {
    words: Vec<String>,
}

impl StaticWordSource {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl WordSource for StaticWordSource {
    fn load(&self) -> io::Result<Vec<String>> {
        Ok(self.words.clone())
    }

    fn describe(&self) -> String {
        format!("<{} in-memory words>", self.words.len())
    }
}
