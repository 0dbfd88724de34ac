use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// `HashTable`: key is the file size, value maps every known hash of that size to
/// the first file seen with it
#[derive(Debug, Clone, Default)]
pub struct HashTable {
    entries: HashMap<u64, HashMap<String, PathBuf>>,
}

impl HashTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The first file registered with this size and hash
    #[must_use]
    pub fn find(&self, size: u64, hash: &str) -> Option<&Path> {
        self.entries
            .get(&size)
            .and_then(|hashes| hashes.get(hash))
            .map(PathBuf::as_path)
    }

    /// Registers a hash; an existing entry keeps its original path.
    pub fn insert(&mut self, size: u64, hash: String, path: PathBuf) {
        self.entries
            .entry(size)
            .or_default()
            .entry(hash)
            .or_insert(path);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
