use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal setup problems; nothing has been copied when one of these is returned
#[derive(Debug, Error)]
pub enum GatherError {
    #[error("from-date {from} must be before or equal to to-date {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    #[error("output directory '{}' already exists, refusing to overwrite it", .0.display())]
    OutputExists(PathBuf),
}
