use crate::config::error::ConfigError;
use crate::config::types::{
    Config, DEFAULT_FOLDER_PREFIX, FolderKind, GatherConfig, MediaTypeTable, OutputLayout,
    OutputSettings,
};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::debug;
use std::path::{Path, PathBuf};

/// Media extension table embedded at compile time
const MEDIA_TYPE_TABLE_JSON: &str = include_str!("../data/media_types.json");

impl Config {
    pub fn new() -> Result<Self> {
        Ok(Self {
            media_type_table: Self::load_embedded_media_type_table()?,
        })
    }

    fn load_embedded_media_type_table() -> Result<MediaTypeTable> {
        serde_json::from_str(MEDIA_TYPE_TABLE_JSON)
            .context("failed to parse embedded media type table")
    }
}

/// One INI section: option name to raw value, in file order
type RawSection = IndexMap<String, String>;

/// Raw INI shape: section name to options. Sections keep their file order and
/// option names are lower-cased, as INI readers conventionally do.
#[derive(Debug, Default)]
struct RawGatherConfig {
    sections: IndexMap<String, RawSection>,
}

impl RawGatherConfig {
    fn new(sections: IndexMap<String, RawSection>) -> Self {
        let sections = sections
            .into_iter()
            .map(|(name, options)| {
                let options = options
                    .into_iter()
                    .map(|(key, value)| (key.to_lowercase(), value))
                    .collect();
                (name, options)
            })
            .collect();
        Self { sections }
    }

    fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|options| options.get(key))
            .map(String::as_str)
    }

    /// Folder entries of one kind, in the order they appear in the file
    fn folders(&self, kind: FolderKind) -> Vec<PathBuf> {
        self.sections
            .get(kind.section_name())
            .map(|options| {
                options
                    .values()
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl GatherConfig {
    /// Reads and validates an INI configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, is not valid INI, or lacks
    /// `[output] base_folder`, or if `layout` names an unknown layout.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Ini))
            .build()
            .and_then(|settings| settings.try_deserialize::<IndexMap<String, RawSection>>())
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self::from_raw(&RawGatherConfig::new(settings))?;
        debug!("loaded gather config from {}: {config:?}", path.display());
        Ok(config)
    }

    fn from_raw(raw: &RawGatherConfig) -> Result<Self, ConfigError> {
        let base_folder = raw
            .value("output", "base_folder")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingKey {
                section: "output",
                key: "base_folder",
            })?;

        let layout_value = raw.value("output", "layout").unwrap_or_default();
        let layout = OutputLayout::parse(layout_value).ok_or_else(|| ConfigError::InvalidValue {
            section: "output",
            key: "layout",
            value: layout_value.to_string(),
        })?;

        let folder_prefix = raw
            .value("output", "folder_prefix")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_FOLDER_PREFIX);
        if folder_prefix.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                section: "output",
                key: "folder_prefix",
                value: folder_prefix.to_string(),
            });
        }

        let folders = FolderKind::all()
            .into_iter()
            .map(|kind| (kind, raw.folders(kind)))
            .collect();

        Ok(Self {
            folders,
            output: OutputSettings {
                base_folder: PathBuf::from(base_folder),
                layout,
                folder_prefix: folder_prefix.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.ini");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_embedded_media_table_loads() {
        let config = Config::new().unwrap();
        assert!(config.media_type_table.image_file.contains(&".jpg".to_string()));
        assert!(config.media_type_table.video_file.contains(&".mp4".to_string()));
    }

    #[test]
    fn test_load_full_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[whatsapp_images]\n\
             folder1 = /wa/images\n\
             folder2 = /wa/images2\n\
             \n\
             [whatsapp_videos]\n\
             folder1 = /wa/videos\n\
             \n\
             [image_folders]\n\
             folder1 = /camera\n\
             \n\
             [output]\n\
             base_folder = /out\n\
             layout = by_type_and_month\n",
        );

        let config = GatherConfig::load(&path).unwrap();
        assert_eq!(
            config.folders_of(FolderKind::WhatsappImages),
            &[PathBuf::from("/wa/images"), PathBuf::from("/wa/images2")]
        );
        assert_eq!(
            config.folders_of(FolderKind::WhatsappVideos),
            &[PathBuf::from("/wa/videos")]
        );
        assert_eq!(
            config.folders_of(FolderKind::ImageFolders),
            &[PathBuf::from("/camera")]
        );
        assert_eq!(config.output.base_folder, PathBuf::from("/out"));
        assert_eq!(config.output.layout, OutputLayout::ByTypeAndMonth);
        assert_eq!(config.output.folder_prefix, DEFAULT_FOLDER_PREFIX);
    }

    #[test]
    fn test_folder_sections_are_optional() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[output]\nbase_folder = /out\n");

        let config = GatherConfig::load(&path).unwrap();
        assert!(config.folders_of(FolderKind::ImageFolders).is_empty());
        assert_eq!(config.output.layout, OutputLayout::ByType);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = GatherConfig::load(&dir.path().join("nope.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_missing_base_folder() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[image_folders]\nfolder1 = /camera\n");

        let err = GatherConfig::load(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingKey {
                section: "output",
                key: "base_folder"
            }
        ));
    }

    #[test]
    fn test_unknown_layout() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[output]\nbase_folder = /out\nlayout = by_color\n");

        let err = GatherConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "layout", .. }));
    }

    #[test]
    fn test_folders_keep_file_order() {
        let dir = TempDir::new().unwrap();
        let entries: String = (1..=12).map(|i| format!("folder{i} = /f{i}\n")).collect();
        let path = write_config(
            &dir,
            &format!("[image_folders]\n{entries}\n[output]\nbase_folder = /out\n"),
        );

        let config = GatherConfig::load(&path).unwrap();
        let expected: Vec<PathBuf> = (1..=12).map(|i| PathBuf::from(format!("/f{i}"))).collect();
        assert_eq!(config.folders_of(FolderKind::ImageFolders), expected.as_slice());
    }

    #[test]
    fn test_unsorted_keys_keep_file_order() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[whatsapp_images]\nzeta = /z\nalpha = /a\n\n[output]\nbase_folder = /out\n",
        );

        let config = GatherConfig::load(&path).unwrap();
        assert_eq!(
            config.folders_of(FolderKind::WhatsappImages),
            &[PathBuf::from("/z"), PathBuf::from("/a")]
        );
    }

    #[test]
    fn test_option_names_are_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[output]\nBase_Folder = /out\nLAYOUT = by_type_and_month\n");

        let config = GatherConfig::load(&path).unwrap();
        assert_eq!(config.output.base_folder, PathBuf::from("/out"));
        assert_eq!(config.output.layout, OutputLayout::ByTypeAndMonth);
    }
}
