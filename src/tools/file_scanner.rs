use anyhow::{Context, Result};
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
    pub size: u64,
}

/// Recursively scans a directory; directories are visited in file-name order so the
/// result is stable between runs
pub fn scan_all_files(directory: &Path) -> Result<Vec<FileInfo>> {
    collect_files(WalkDir::new(directory), directory)
}

/// Lists the regular files directly inside `folder`, sorted by file name
pub fn list_folder_files(folder: &Path) -> Result<Vec<FileInfo>> {
    collect_files(WalkDir::new(folder).min_depth(1).max_depth(1), folder)
}

fn collect_files(walker: WalkDir, root: &Path) -> Result<Vec<FileInfo>> {
    let mut files = Vec::new();

    for entry in walker.follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            // an unreadable root fails the whole scan
            Err(e) if e.depth() == 0 || e.path() == Some(root) => {
                return Err(e).with_context(|| format!("failed to read {}", root.display()));
            }
            Err(e) => {
                warn!("skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };

        if let Some(info) = to_file_info(entry) {
            files.push(info);
        }
    }

    Ok(files)
}

fn to_file_info(entry: DirEntry) -> Option<FileInfo> {
    if !entry.file_type().is_file() {
        return None;
    }
    match entry.metadata() {
        Ok(metadata) => Some(FileInfo {
            size: metadata.len(),
            path: entry.into_path(),
        }),
        Err(e) => {
            warn!("skipping {}: {e}", entry.path().display());
            None
        }
    }
}
