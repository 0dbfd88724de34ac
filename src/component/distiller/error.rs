use thiserror::Error;

/// Invalid distill settings, reported before any file is copied
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DistillError {
    #[error("step must be a positive integer, got {0}")]
    InvalidStep(i64),

    #[error("offset must not be negative, got {0}")]
    InvalidOffset(i64),
}
