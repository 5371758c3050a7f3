//! Record sources: where fresh collections come from.

use crate::consts::DEFAULT_MAX_PAGES;
use crate::error::{ErrorKind, Result};
use crate::fetch::Fetch;
use crate::marketplace::{Marketplace, Page};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::{Stream, TryStreamExt, pin_mut};
use rolba_record::{Record, RecordFactory, RecordsCollection};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;

/// Produces the current collection of records for one source.
#[async_trait]
pub trait RecordsSource<R: Record>: Send + Sync {
    /// Name of the source, used for logging only.
    fn name(&self) -> &str;

    /// Crawl the source to completion.
    async fn extract(&self) -> Result<RecordsCollection<R>>;
}

/// Crawls a [`Marketplace`] page by page and turns its listings into records.
///
/// Pagination stops when a page has no successor, when a page would be
/// visited twice, or after `max_pages` pages.
pub struct MarketplaceSource<M, F> {
    marketplace: M,
    fetcher: Arc<dyn Fetch>,
    factory: F,
    max_pages: usize,
}
impl<M: Marketplace, F: RecordFactory> MarketplaceSource<M, F> {
    pub fn new(marketplace: M, fetcher: Arc<dyn Fetch>, factory: F) -> Self {
        Self {
            marketplace,
            fetcher,
            factory,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn marketplace(&self) -> &M {
        &self.marketplace
    }

    /// Fetch and parse pages lazily, starting from the marketplace's start
    /// URL.
    pub fn pages(&self) -> impl Stream<Item = Result<Page>> + Send + '_ {
        try_stream! {
            let mut visited = HashSet::new();
            let mut next = Some(self.marketplace.start_url().clone());
            while let Some(url) = next.take() {
                if visited.contains(&url) {
                    tracing::warn!(url = %url, "Pagination loops back to a visited page, stopping");
                    break;
                }
                if visited.len() >= self.max_pages {
                    tracing::warn!(max_pages = self.max_pages, "Page limit reached, stopping");
                    break;
                }
                visited.insert(url.clone());
                let html = self.fetcher.fetch(&url).await?;
                let page = self.marketplace.parse_page(&url, &html)?;
                tracing::debug!(url = %url, listings = page.listings.len(), "Parsed page");
                next = page.next.clone();
                yield page;
            }
        }
    }
}

#[async_trait]
impl<M, F> RecordsSource<F::Record> for MarketplaceSource<M, F>
where
    M: Marketplace,
    F: RecordFactory,
{
    fn name(&self) -> &str {
        self.marketplace.name()
    }

    #[instrument(skip_all, fields(source = self.marketplace.name(), pages, records))]
    async fn extract(&self) -> Result<RecordsCollection<F::Record>> {
        let mut records = RecordsCollection::new();
        let mut pages = 0usize;
        let stream = self.pages();
        pin_mut!(stream);
        while let Some(page) = stream.try_next().await? {
            pages += 1;
            for raw in &page.listings {
                records.add(self.factory.create_from_raw(raw).map_err(ErrorKind::record)?);
            }
        }
        tracing::Span::current().record("pages", pages);
        tracing::Span::current().record("records", records.len());
        tracing::info!("Crawl finished");
        Ok(records)
    }
}
