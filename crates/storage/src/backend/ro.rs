//! Read-only storage backend.
//!
//! Wraps another backend and drops every write while reporting success, so a
//! dry run can compute diffs against real snapshots without updating them.

use async_trait::async_trait;
use std::path::Path;

use crate::{BackendHandle, StorageBackend, error::Result};

/// Read-only storage backend.
///
/// Reads go to the wrapped backend; writes and renames are logged
/// as [`info events`](tracing::Event) and skipped.
#[derive(Clone)]
pub struct ReadOnlyBackend {
    inner: BackendHandle,
}
impl ReadOnlyBackend {
    pub fn new(inner: BackendHandle) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StorageBackend for ReadOnlyBackend {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        self.inner.exists(path).await
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.inner.read(path).await
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        tracing::info!(
            backend = self.name(),
            path = %path.display(),
            bytes = data.len(),
            "Skipping write during read-only mode"
        );
        Ok(())
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        tracing::info!(
            backend = self.name(),
            from = %from.display(),
            to = %to.display(),
            "Skipping rename during read-only mode"
        );
        Ok(())
    }
}
