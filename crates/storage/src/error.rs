//! Storage Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use rolba_record::error::{Error as RecordError, ErrorKind as RecordErrorKind};
use std::io::Error as IoError;
use std::path::PathBuf;

/// A storage error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// File does not exist
    #[display("file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// Path contains invalid characters or escapes root
    #[display("invalid path: {}", _0.display())]
    InvalidPath(#[error(not(source))] PathBuf),
    /// Snapshot exists but is not a JSON array of objects.
    #[display("snapshot content is not valid: {}", _0.display())]
    CorruptSnapshot(#[error(not(source))] PathBuf),
    /// A stored entry does not satisfy the record schema.
    #[display("snapshot entry rejected: {_0}")]
    Schema(RecordErrorKind),
    /// Snapshot could not be serialized.
    #[display("failed to serialize snapshot: {}", _0.display())]
    Serialize(#[error(not(source))] PathBuf),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}
impl ErrorKind {
    /// Convert a record error into a storage error, preserving the record
    /// crate's `Exn` frame (error tree) as a child in its own error tree.
    #[track_caller]
    pub fn schema(err: RecordError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Schema(inner))
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
