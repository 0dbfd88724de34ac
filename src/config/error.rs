use std::path::PathBuf;
use thiserror::Error;

/// Problems with `config.ini` that stop a gather run before any file is touched
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to parse configuration file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    #[error("missing required setting [{section}] {key}")]
    MissingKey {
        section: &'static str,
        key: &'static str,
    },

    #[error("invalid value '{value}' for [{section}] {key}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}

/// Printed when the configuration file is missing
pub const EXAMPLE_CONFIG: &str = "\
[whatsapp_images]
folder1 = /path/to/whatsapp/images1
folder2 = /path/to/whatsapp/images2

[whatsapp_videos]
folder1 = /path/to/whatsapp/videos1

[image_folders]
folder1 = /path/to/mixed/media1
folder2 = /path/to/mixed/media2

[output]
base_folder = /path/to/output/directory
# by_type (default) or by_type_and_month
layout = by_type
";
