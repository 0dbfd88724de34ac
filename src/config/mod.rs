pub mod error;
pub mod load;
pub mod types;

pub use error::{ConfigError, EXAMPLE_CONFIG};
pub use types::{
    Config, DEFAULT_FOLDER_PREFIX, FolderKind, GatherConfig, MediaKind, MediaTypeTable,
    OutputLayout, OutputSettings,
};
