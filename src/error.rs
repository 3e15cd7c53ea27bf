//! Error type for the fallible edges of the crate: configuration, file
//! loading and offset parsing. Hierarchy operations themselves never fail.

use std::num::ParseIntError;
use std::path::PathBuf;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A tunable is outside its valid domain.
    #[error("invalid configuration for '{field}': {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    /// Opening or mapping a file failed.
    #[error("failed to {operation} '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Nothing to navigate.
    #[error("file '{}' is empty", .path.display())]
    EmptyFile { path: PathBuf },

    /// An offset argument could not be parsed.
    #[error("invalid offset '{value}': {source}")]
    InvalidOffset {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl Error {
    pub(crate) fn config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}
