//! Media gatherer
//!
//! Collects images and videos from phone sync folders for a date range, drops
//! duplicates and thumbnails, cleans file names and copies everything into a fresh
//! `<prefix><to-date>` output tree

mod capture_date;
mod duplicate_filter;
mod error;
mod filename_cleaner;
mod main;
mod output_tree;

pub use capture_date::{DateRange, capture_date, date_from_filename};
pub use duplicate_filter::{DuplicateCheck, DuplicateFilter};
pub use error::GatherError;
pub use filename_cleaner::FilenameCleaner;
pub use main::{GatherResult, Gatherer};
pub use output_tree::{
    IMAGES_FOLDER, OutputTree, VIDEOS_FOLDER, WHATSAPP_IMAGES_FOLDER, category_folder,
};
