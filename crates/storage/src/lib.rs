//! Storage backends and snapshot persistence.
//!
//! [`StorageBackend`] is a byte-level interface over a storage root (the
//! local filesystem in production, memory in tests). [`JsonSnapshotStore`]
//! builds per-source snapshot persistence on top of it.

pub mod backend;
pub mod error;
mod path;
mod snapshot;

pub use crate::backend::StorageBackend;
pub use crate::path::validate as validate_path;
pub use crate::snapshot::{JsonSnapshotStore, Snapshot, SnapshotStore};
use std::sync::Arc;

pub type BackendHandle = Arc<dyn StorageBackend + Send + Sync>;
