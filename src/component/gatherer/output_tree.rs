use super::error::GatherError;
use crate::config::{FolderKind, MediaKind, OutputLayout, OutputSettings};
use crate::tools::ensure_directory_exists;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

pub const VIDEOS_FOLDER: &str = "Videos";
pub const WHATSAPP_IMAGES_FOLDER: &str = "Whatsapp-Bilder";
pub const IMAGES_FOLDER: &str = "Bilder";

/// Type folder for a file, decided by where it came from and what it is
#[must_use]
pub const fn category_folder(kind: FolderKind, media: MediaKind) -> &'static str {
    match (kind, media) {
        (FolderKind::WhatsappImages, _) => WHATSAPP_IMAGES_FOLDER,
        (FolderKind::WhatsappVideos, _) | (FolderKind::ImageFolders, MediaKind::Video) => {
            VIDEOS_FOLDER
        }
        (FolderKind::ImageFolders, MediaKind::Image) => IMAGES_FOLDER,
    }
}

/// The per-run output folder `<base>/<prefix><to-date>` and its layout
#[derive(Debug, Clone)]
pub struct OutputTree {
    root: PathBuf,
    layout: OutputLayout,
}

impl OutputTree {
    #[must_use]
    pub fn new(settings: &OutputSettings, to_date: NaiveDate) -> Self {
        let folder_name = format!("{}{}", settings.folder_prefix, to_date.format("%Y-%m-%d"));
        Self {
            root: settings.base_folder.join(folder_name),
            layout: settings.layout,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root and the three type folders.
    ///
    /// # Errors
    /// `GatherError::OutputExists` if the root is already there; I/O errors otherwise
    pub fn create(&self) -> Result<()> {
        if self.root.exists() {
            return Err(GatherError::OutputExists(self.root.clone()).into());
        }
        for folder in [VIDEOS_FOLDER, WHATSAPP_IMAGES_FOLDER, IMAGES_FOLDER] {
            ensure_directory_exists(&self.root.join(folder))?;
        }
        Ok(())
    }

    #[must_use]
    pub fn destination_dir(&self, kind: FolderKind, media: MediaKind, date: NaiveDate) -> PathBuf {
        let dir = self.root.join(category_folder(kind, media));
        match self.layout {
            OutputLayout::ByType => dir,
            OutputLayout::ByTypeAndMonth => dir
                .join(format!("{:04}", date.year()))
                .join(format!("{:02}", date.month())),
        }
    }
}
