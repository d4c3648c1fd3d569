//! Crate-wide error type
//!
//! Errors carry their messages as strings so they stay `Clone` and can travel
//! inside iced messages back to the update loop.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// File system access failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Catalog file is malformed or violates its invariants
    #[error("invalid catalog: {0}")]
    Catalog(String),

    /// Settings file could not be parsed
    #[error("invalid settings: {0}")]
    Settings(String),

    /// Image data could not be decoded or encoded
    #[error("image decode failed: {0}")]
    Decode(String),

    /// A background task panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
