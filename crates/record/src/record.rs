//! Record capabilities.
//!
//! A record is anything the pipeline can deduplicate, diff and show to a
//! human. Factories and mappers convert between records and the loosely-typed
//! JSON payloads produced by scrapers and stored in snapshots.

use crate::error::Result;
use serde_json::Value;
use std::fmt::{Debug, Display};

/// An immutable listing-like value.
///
/// Two equivalence relations exist over records, and they are deliberately
/// different:
///
/// - [`PartialEq`] is *structural* equality over every field. Collections use
///   it for insertion, membership and collection equality.
/// - [`display_key()`](Self::display_key) is the human-readable rendering.
///   [`RecordsCollection::difference`](crate::RecordsCollection::difference)
///   compares records by this key only, so two records that render the same
///   are "the same" when deciding what is new even if they differ elsewhere.
pub trait Record: Clone + Debug + Display + PartialEq + Send + Sync + 'static {
    /// The canonical string form. Defaults to the [`Display`] rendering.
    fn display_key(&self) -> String {
        self.to_string()
    }
}

/// Builds records from raw payloads, validating them on the way in.
pub trait RecordFactory: Send + Sync {
    type Record: Record;

    /// Validate `raw` and build a record from it.
    ///
    /// Fails with [`ErrorKind::Schema`](crate::error::ErrorKind::Schema) when
    /// the payload does not describe a valid record.
    fn create_from_raw(&self, raw: &Value) -> Result<Self::Record>;
}

/// Projects records back to raw payloads for persistence.
///
/// For every valid payload `p`, `to_raw(create_from_raw(p))` carries the same
/// fields as `p` with numerically equal values (modulo fields the factory
/// ignores). Number representation may change: `100.0` can come back as `100`.
pub trait RecordMapper: Send + Sync {
    type Record: Record;

    fn to_raw(&self, record: &Self::Record) -> Value;
}
