//! Content fingerprints for duplicate detection and collision checks

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

/// Hex BLAKE3 digest of the whole file, streamed from disk
pub fn calculate_file_hash(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut hasher = blake3::Hasher::new();
    hasher
        .update_reader(file)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(hasher.finalize().to_hex().to_string())
}
