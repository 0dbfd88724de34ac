use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaTypeTable {
    #[serde(rename = "IMAGE_FILE")]
    pub image_file: Vec<String>,
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
}

/// Media kind derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaTypeTable {
    /// Extension lookup is case-insensitive; files without an extension are not media.
    #[must_use]
    pub fn media_kind(&self, path: &Path) -> Option<MediaKind> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))?;

        if self.image_file.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
            Some(MediaKind::Image)
        } else if self.video_file.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_image_file(&self, path: &Path) -> bool {
        self.media_kind(path) == Some(MediaKind::Image)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub media_type_table: MediaTypeTable,
}

/// The three kinds of source folders a gather config can list.
///
/// Each maps to its own INI section and decides where files end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderKind {
    WhatsappImages,
    WhatsappVideos,
    ImageFolders,
}

impl FolderKind {
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::WhatsappImages, Self::WhatsappVideos, Self::ImageFolders]
    }

    #[must_use]
    pub const fn section_name(&self) -> &'static str {
        match self {
            Self::WhatsappImages => "whatsapp_images",
            Self::WhatsappVideos => "whatsapp_videos",
            Self::ImageFolders => "image_folders",
        }
    }
}

/// How copied files are arranged below the output root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLayout {
    /// `Bilder/`, `Videos/`, `Whatsapp-Bilder/`
    #[default]
    ByType,
    /// Same folders plus a `YYYY/MM` level taken from the capture date
    ByTypeAndMonth,
}

impl OutputLayout {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "by_type" => Some(Self::ByType),
            "by_type_and_month" => Some(Self::ByTypeAndMonth),
            _ => None,
        }
    }
}

pub const DEFAULT_FOLDER_PREFIX: &str = "allebilder-bis-";

#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub base_folder: PathBuf,
    pub layout: OutputLayout,
    pub folder_prefix: String,
}

/// Validated contents of `config.ini`
#[derive(Debug, Clone)]
pub struct GatherConfig {
    /// Input folders per kind, in file order within each section
    pub folders: Vec<(FolderKind, Vec<PathBuf>)>,
    pub output: OutputSettings,
}

impl GatherConfig {
    #[must_use]
    pub fn folders_of(&self, kind: FolderKind) -> &[PathBuf] {
        self.folders
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, folders)| folders.as_slice())
            .unwrap_or_default()
    }
}
