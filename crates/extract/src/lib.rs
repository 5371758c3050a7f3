//! Crawling second-hand marketplaces into [`RecordsCollection`]s.
//!
//! A [`Marketplace`] knows one site's markup, a [`Fetch`] implementation
//! retrieves pages, and a [`MarketplaceSource`] ties them together into a
//! [`RecordsSource`] the pipeline can run.
//!
//! [`RecordsCollection`]: rolba_record::RecordsCollection

mod consts;
pub mod error;
mod fetch;
mod marketplace;
pub mod sites;
mod source;

pub use crate::fetch::{DEFAULT_TIMEOUT, Fetch, HttpFetcher};
pub use crate::marketplace::{Marketplace, Page, parse_price};
pub use crate::source::{MarketplaceSource, RecordsSource};
