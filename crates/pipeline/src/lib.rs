//! One watch run: crawl every source, diff against its snapshot, notify.
//!
//! ```no_run
//! use rolba_extract::{HttpFetcher, MarketplaceSource, sites::VinylEmpire};
//! use rolba_notify::LogNotifier;
//! use rolba_pipeline::Pipeline;
//! use rolba_record::{ListingFactory, ListingMapper};
//! use rolba_storage::{JsonSnapshotStore, Snapshot, backend::LocalBackend};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(LocalBackend::new("snapshots", "/var/lib/rolba")?);
//! let store = Arc::new(JsonSnapshotStore::new(backend, ListingFactory, ListingMapper));
//! let source = MarketplaceSource::new(VinylEmpire::default(), Arc::new(HttpFetcher::new()?), ListingFactory);
//! let sections = Pipeline::new(Arc::new(LogNotifier))
//!     .register("Vinyl Empire", Arc::new(source), Snapshot::new(store, "vinyl_empire_records.json"))
//!     .run()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
mod pipeline;

pub use crate::pipeline::Pipeline;
