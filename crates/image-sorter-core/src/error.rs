use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the image-sorter library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File or directory not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A file could not be interpreted as an image, or its pixel data is
    /// inconsistent (bad dimensions, truncated buffer)
    #[error("Decode error: {0}")]
    Decode(String),

    /// A tour was requested over zero images
    #[error("No images to order")]
    EmptyInput,

    /// A rename could not be applied
    #[error("Cannot rename {} to {}: {reason}", .from.display(), .to.display())]
    Filesystem {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// Invalid configuration or run-state
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Unsupported image format
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
}
