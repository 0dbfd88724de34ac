mod file_hasher;
mod file_placement;
mod file_scanner;
mod hash_table;
mod path_validator;

pub use file_hasher::calculate_file_hash;
pub use file_placement::{
    Placement, candidate_names, copy_preserving_mtime, files_identical, place_file,
};
pub use file_scanner::{FileInfo, list_folder_files, scan_all_files};
pub use hash_table::HashTable;
pub use path_validator::{
    ensure_directory_exists, ensure_writable_directory, validate_directory_exists,
};
