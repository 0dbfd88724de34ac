//! Copying files into an output folder without clobbering anything already there
//!
//! Name collisions are resolved the same way on every run: the original name is
//! tried first, then (for WhatsApp names) the following WA numbers, then `_1`, `_2`
//! suffixes. A candidate already holding identical content counts as done.

use crate::tools::calculate_file_hash;
use anyhow::{Context, Result, bail};
use log::debug;
use regex::Regex;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// How far past the current WA number a free slot is searched for
const WA_NUMBER_SEARCH_LIMIT: u32 = 1000;

static REGEX_WA_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*-WA)(\d+)$").expect("Invalid regex"));

/// Where a file ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Freshly copied to this path
    Copied(PathBuf),
    /// A file with identical content already exists at this path
    AlreadyPresent(PathBuf),
}

fn split_name(file_name: &str) -> (String, String) {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map_or_else(|| file_name.to_string(), |s| s.to_string_lossy().into_owned());
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, ext)
}

/// The deterministic sequence of names tried for `file_name`
pub fn candidate_names(file_name: &str) -> impl Iterator<Item = String> {
    let (stem, ext) = split_name(file_name);

    let wa_candidates: Vec<String> = REGEX_WA_NUMBER
        .captures(&stem)
        .and_then(|caps| {
            let prefix = caps.get(1)?.as_str().to_string();
            let current: u32 = caps.get(2)?.as_str().parse().ok()?;
            Some(
                (current.saturating_add(1)..current.saturating_add(WA_NUMBER_SEARCH_LIMIT))
                    .map(|num| format!("{prefix}{num:04}{ext}"))
                    .collect(),
            )
        })
        .unwrap_or_default();

    std::iter::once(file_name.to_string())
        .chain(wa_candidates)
        .chain((1..=u32::MAX).map(move |counter| format!("{stem}_{counter}{ext}")))
}

/// Same size and same BLAKE3 hash
pub fn files_identical(a: &Path, b: &Path) -> Result<bool> {
    let size_a = fs::metadata(a)
        .with_context(|| format!("failed to read metadata of {}", a.display()))?
        .len();
    let size_b = fs::metadata(b)
        .with_context(|| format!("failed to read metadata of {}", b.display()))?
        .len();
    if size_a != size_b {
        return Ok(false);
    }
    Ok(calculate_file_hash(a)? == calculate_file_hash(b)?)
}

/// Copies `source` into `target_dir` under `file_name`, or the first free
/// alternative name. The source is only ever read.
pub fn place_file(source: &Path, target_dir: &Path, file_name: &str) -> Result<Placement> {
    for candidate in candidate_names(file_name) {
        let target = target_dir.join(&candidate);

        match fs::symlink_metadata(&target) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                copy_preserving_mtime(source, &target)?;
                return Ok(Placement::Copied(target));
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to inspect {}", target.display()));
            }
            Ok(metadata) => {
                if metadata.is_file() && files_identical(source, &target)? {
                    return Ok(Placement::AlreadyPresent(target));
                }
                debug!("name taken: {}", target.display());
            }
        }
    }

    bail!(
        "no free file name for {} in {}",
        file_name,
        target_dir.display()
    )
}

/// Copies a file, keeps the source modification time and makes the copy
/// writable (0644 on Unix)
pub fn copy_preserving_mtime(source: &Path, dest: &Path) -> Result<()> {
    let modified = fs::metadata(source)
        .and_then(|m| m.modified())
        .with_context(|| format!("failed to read modification time of {}", source.display()))?;

    fs::copy(source, dest)
        .with_context(|| format!("failed to copy {} -> {}", source.display(), dest.display()))?;

    set_output_permissions(dest)?;

    let file = OpenOptions::new()
        .write(true)
        .open(dest)
        .with_context(|| format!("failed to open {}", dest.display()))?;
    file.set_modified(modified)
        .with_context(|| format!("failed to set modification time of {}", dest.display()))?;

    Ok(())
}

#[cfg(unix)]
fn set_output_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
        .with_context(|| format!("failed to set permissions of {}", path.display()))
}

#[cfg(not(unix))]
fn set_output_permissions(path: &Path) -> Result<()> {
    let mut permissions = fs::metadata(path)
        .with_context(|| format!("failed to read metadata of {}", path.display()))?
        .permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
        .with_context(|| format!("failed to set permissions of {}", path.display()))
}
