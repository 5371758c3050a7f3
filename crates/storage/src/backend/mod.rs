//! Storage backend trait and implementations.
//!
//! Snapshots only need a handful of byte-level operations: reads, writes and
//! [`rename`](StorageBackend::rename), which snapshot saving relies on to
//! replace files in one step.

mod local;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod ro;

pub use self::local::LocalBackend;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockBackend;
pub use self::ro::ReadOnlyBackend;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Unified interface for storage backends.
///
/// All paths are relative to the storage root and must pass
/// [`validate_path`](crate::validate_path). Implementations enforce this.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use rolba_storage::{backend::StorageBackend, error::Result};
///
/// async fn snapshot_size(backend: &dyn StorageBackend) -> Result<usize> {
///     let path = Path::new("vinyl_empire_records.json");
///     if backend.exists(path).await? {
///         Ok(backend.read(path).await?.len())
///     } else {
///         Ok(0)
///     }
/// }
/// ```
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Name of the backend, used for logging only.
    fn name(&self) -> &str;

    /// Check if a file exists.
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Read file contents.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the file
    /// does not exist.
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write file contents, replacing any existing file.
    ///
    /// Implementations create parent directories as needed.
    async fn write(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// Move a file, overwriting the destination if it exists.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the source
    /// does not exist. Implementations create parent directories for the
    /// destination as needed.
    async fn rename(&self, from: &Path, to: &Path) -> Result<()>;
}
