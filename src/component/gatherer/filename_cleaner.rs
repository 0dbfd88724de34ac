//! File name cleanup for gathered media
//!
//! Phones and WhatsApp prefix their files with `IMG-`, `IMG_`, `VID-` or `VID_`; the
//! gathered copies drop that prefix and use lower-case extensions with `.jpeg`
//! folded into `.jpg`.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

const SOURCE_PREFIXES: [&str; 4] = ["IMG-", "IMG_", "VID-", "VID_"];

/// `YYYYMMDD_HHMMSS...` camera names and `YYYYMMDD-WAnnnn...` WhatsApp names
static REGEX_CANONICAL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}(0[1-9]|1[0-2])(0[1-9]|[12][0-9]|3[01])[_-]([W0-9][A0-9]\d{4})")
        .expect("Invalid regex")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct FilenameCleaner;

impl FilenameCleaner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Strips a known source prefix and normalises the extension
    #[must_use]
    pub fn clean(&self, filename: &str) -> String {
        let (name, extension) = split_extension(filename);

        let name = SOURCE_PREFIXES
            .iter()
            .find_map(|prefix| name.strip_prefix(prefix))
            .unwrap_or(name);

        let extension = match extension.to_lowercase().as_str() {
            ".jpeg" => ".jpg".to_string(),
            other => other.to_string(),
        };

        format!("{name}{extension}")
    }

    /// Whether a cleaned name follows the expected camera/WhatsApp pattern with a
    /// `.jpg` or `.mp4` extension
    #[must_use]
    pub fn is_canonical(&self, cleaned: &str) -> bool {
        (cleaned.ends_with(".jpg") || cleaned.ends_with(".mp4"))
            && REGEX_CANONICAL_NAME.is_match(cleaned)
    }
}

/// Splits off the last extension including its dot; dotfiles have none
fn split_extension(filename: &str) -> (&str, &str) {
    match Path::new(filename).extension().and_then(|e| e.to_str()) {
        Some(ext) => filename.split_at(filename.len() - ext.len() - 1),
        None => (filename, ""),
    }
}
