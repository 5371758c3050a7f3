//! Configuration Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No file at the configured (or default) location.
    #[display("configuration file ({}) hasn't been found", _0.display())]
    FileNotFound(#[error(not(source))] PathBuf),
    /// The file (or environment) does not deserialize into a configuration.
    #[display("configuration content is not valid")]
    Parse,
    /// The configuration deserialized but makes no sense.
    #[display("configuration is not valid: {_0}")]
    Validation(#[error(not(source))] String),
    /// No home directory to derive default locations from.
    #[display("cannot determine the platform configuration directories")]
    Directories,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Configuration doesn't fix itself.
        false
    }
}
