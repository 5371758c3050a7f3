//! Records and record collections.
//!
//! A [`Listing`] is one marketplace offer: a name, a price and a link. It is
//! built from loosely-typed JSON by [`ListingFactory`] (which enforces the
//! schema) and projected back by [`ListingMapper`]. A [`RecordsCollection`]
//! holds a deduplicated, ordered set of records and knows how to work out
//! which of them are new compared to an earlier collection.

mod collection;
pub mod error;
mod listing;
mod record;

pub use crate::collection::{RecordsCollection, display_key, structural_eq};
pub use crate::listing::{CURRENCY, Listing, ListingFactory, ListingMapper};
pub use crate::record::{Record, RecordFactory, RecordMapper};
