use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Unable to read {0:?} with any known encoding")]
    UnreadableFile(PathBuf),

    #[error("File is empty or contains only whitespace: {0:?}")]
    EmptyInput(PathBuf),

    #[error("No CJK ideographs found in {0:?}")]
    EmptyExtraction(PathBuf),

    #[error("No character in {path:?} occurs at least {min_frequency} times")]
    BelowMinFrequency { path: PathBuf, min_frequency: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid character pattern: {0}")]
    Pattern(#[from] regex::Error),
}
