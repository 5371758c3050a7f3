//! Per-source snapshots: "what we saw last time".
//!
//! A snapshot is the full [`RecordsCollection`] observed by the latest run for
//! one source. It is always replaced wholesale; there is no merging.

use crate::error::{ErrorKind, Result};
use crate::{BackendHandle, validate_path};
use async_trait::async_trait;
use exn::ResultExt;
use rolba_record::{Record, RecordFactory, RecordMapper, RecordsCollection};
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::instrument;

/// Suffix of the sibling file a snapshot is written to before being renamed
/// into place.
const TEMPORARY_SUFFIX: &str = ".tmp";

/// Loads and saves the collection last observed at a location.
#[async_trait]
pub trait SnapshotStore<R: Record>: Send + Sync {
    /// Load the collection stored at `location`.
    ///
    /// Nothing stored yet is not an error: the first run has no history, so
    /// an empty collection comes back.
    async fn load(&self, location: &Path) -> Result<RecordsCollection<R>>;

    /// Replace whatever is stored at `location` with `records`.
    async fn save(&self, location: &Path, records: &RecordsCollection<R>) -> Result<()>;
}

/// A store bound to one location: the snapshot of a single source.
pub struct Snapshot<R: Record> {
    store: Arc<dyn SnapshotStore<R>>,
    location: PathBuf,
}
impl<R: Record> Snapshot<R> {
    pub fn new(store: Arc<dyn SnapshotStore<R>>, location: impl Into<PathBuf>) -> Self {
        Self {
            store,
            location: location.into(),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub async fn load(&self) -> Result<RecordsCollection<R>> {
        self.store.load(&self.location).await
    }

    pub async fn save(&self, records: &RecordsCollection<R>) -> Result<()> {
        self.store.save(&self.location, records).await
    }
}

/// Snapshots stored as JSON arrays of `{name, price, link}` objects.
///
/// Entries go through the [`RecordFactory`] on the way in, so a tampered
/// snapshot fails with [`ErrorKind::Schema`] instead of producing bogus
/// records. Saving writes a sibling `*.tmp` file and renames it over the
/// target, so a later load never observes a half-written snapshot.
pub struct JsonSnapshotStore<F, M> {
    backend: BackendHandle,
    factory: F,
    mapper: M,
}
impl<F, M> JsonSnapshotStore<F, M>
where
    F: RecordFactory,
    M: RecordMapper<Record = F::Record>,
{
    pub fn new(backend: BackendHandle, factory: F, mapper: M) -> Self {
        Self { backend, factory, mapper }
    }

    fn temporary(location: &Path) -> PathBuf {
        let mut name = OsString::from(location.as_os_str());
        name.push(TEMPORARY_SUFFIX);
        PathBuf::from(name)
    }
}

#[async_trait]
impl<F, M> SnapshotStore<F::Record> for JsonSnapshotStore<F, M>
where
    F: RecordFactory,
    M: RecordMapper<Record = F::Record>,
{
    #[instrument(skip_all, fields(backend = self.backend.name(), location = %location.display(), records))]
    async fn load(&self, location: &Path) -> Result<RecordsCollection<F::Record>> {
        let location = validate_path(location)?;
        if !self.backend.exists(&location).await? {
            tracing::debug!("No snapshot stored yet");
            return Ok(RecordsCollection::new());
        }
        let bytes = self.backend.read(&location).await?;
        let entries: Vec<Value> =
            serde_json::from_slice(&bytes).or_raise(|| ErrorKind::CorruptSnapshot(location.clone()))?;
        let mut records = RecordsCollection::new();
        for entry in &entries {
            records.add(self.factory.create_from_raw(entry).map_err(ErrorKind::schema)?);
        }
        tracing::Span::current().record("records", records.len());
        Ok(records)
    }

    #[instrument(
        skip_all,
        fields(backend = self.backend.name(), location = %location.display(), records = records.len())
    )]
    async fn save(&self, location: &Path, records: &RecordsCollection<F::Record>) -> Result<()> {
        let location = validate_path(location)?;
        let entries: Vec<Value> = records.iter().map(|record| self.mapper.to_raw(record)).collect();
        let bytes = serde_json::to_vec(&entries).or_raise(|| ErrorKind::Serialize(location.clone()))?;
        let temporary = Self::temporary(&location);
        self.backend.write(&temporary, &bytes).await?;
        self.backend.rename(&temporary, &location).await?;
        tracing::debug!(bytes = bytes.len(), "Snapshot saved");
        Ok(())
    }
}
