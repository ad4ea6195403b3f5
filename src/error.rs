//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, decoder, encoder and resizer errors, and provides semantic
//! variants for argument validation, naming and storage failures.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode {format} thumbnail: {reason}")]
    Encode { format: String, reason: String },

    #[error("Resize error: {0}")]
    Resize(#[from] fast_image_resize::ResizeError),

    #[error("Image buffer error: {0}")]
    ImageBuffer(#[from] fast_image_resize::ImageBufferError),

    #[error("Unsupported image format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Size must be greater than 0, got: {width}x{height}")]
    ZeroSize { width: u32, height: u32 },

    #[error("Invalid size parameter: {size}. Expected WIDTHxHEIGHT, e.g. 300x200")]
    InvalidSize { size: String },

    #[error("File name has no extension: {name}")]
    MissingExtension { name: String },

    #[error("There is already a file named {name}")]
    NamingCollision { name: String },

    #[error("File not found in storage: {name}")]
    NotFound { name: String },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }

    pub(crate) fn encode<E: std::fmt::Display>(format: impl std::fmt::Display, e: E) -> Self {
        Error::Encode {
            format: format.to_string(),
            reason: e.to_string(),
        }
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(e: tempfile::PersistError) -> Self {
        Error::Io(e.error)
    }
}
