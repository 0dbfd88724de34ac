use anyhow::{Context, Result, bail};
use std::path::Path;

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("path does not exist: {}", path.display());
    }
    if !path.is_dir() {
        bail!("path is not a directory: {}", path.display());
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Creates the directory if needed and checks that new files can be written into it.
///
/// Writability is tested by creating (and dropping) a temporary file inside the
/// directory, so ownership and ACLs count, not just the permission bits.
pub fn ensure_writable_directory(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        bail!("output path is not a directory: {}", path.display());
    }
    ensure_directory_exists(path)?;

    tempfile::Builder::new()
        .prefix(".write-check")
        .tempfile_in(path)
        .with_context(|| format!("output directory is not writable: {}", path.display()))?;
    Ok(())
}
