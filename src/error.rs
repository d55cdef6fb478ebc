//! Error types for the photo organizer

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for photo organizer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the photo organizer
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read EXIF data from {path}: {message}")]
    ExifRead { path: PathBuf, message: String },

    #[error("Failed to parse capture timestamp '{value}'")]
    TimestampParse { value: String },

    #[error("Failed to relocate {from} to {to}: {message}")]
    Relocate {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },

    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}
