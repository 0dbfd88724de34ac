//! Content-based duplicate detection within one gather run
//!
//! Files are keyed by size and BLAKE3 hash; the first file registered with a
//! given content wins.

use crate::tools::{HashTable, calculate_file_hash};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateCheck {
    Unique,
    /// Same content as this earlier file
    DuplicateOf(PathBuf),
}

#[derive(Debug, Default)]
pub struct DuplicateFilter {
    hash_table: HashTable,
}

impl DuplicateFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks the file up and registers it when it is new
    pub fn check(&mut self, path: &Path) -> Result<DuplicateCheck> {
        let size = fs::metadata(path)
            .with_context(|| format!("failed to read metadata of {}", path.display()))?
            .len();
        let hash = calculate_file_hash(path)?;

        if let Some(original) = self.hash_table.find(size, &hash) {
            return Ok(DuplicateCheck::DuplicateOf(original.to_path_buf()));
        }

        self.hash_table.insert(size, hash, path.to_path_buf());
        Ok(DuplicateCheck::Unique)
    }

    /// Number of distinct files registered so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.hash_table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hash_table.is_empty()
    }
}
