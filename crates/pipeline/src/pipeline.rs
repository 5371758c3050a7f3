use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use futures::future::try_join_all;
use rolba_extract::RecordsSource;
use rolba_notify::{Notifier, Section};
use rolba_record::{Listing, Record, RecordsCollection};
use rolba_storage::Snapshot;
use std::sync::Arc;
use tracing::instrument;

/// A registered source: what to crawl, where its history lives, and what to
/// call it in the digest.
struct Registration<R: Record> {
    title: String,
    source: Arc<dyn RecordsSource<R>>,
    snapshot: Snapshot<R>,
}

/// Crawls every registered source, reports what each one has that its
/// snapshot did not, and replaces the snapshots with the fresh crawls.
///
/// A run is all-or-nothing: the first failure aborts it and nothing is sent.
/// Crawls run concurrently; snapshots are processed and sections reported in
/// registration order.
pub struct Pipeline<R: Record = Listing> {
    notifier: Arc<dyn Notifier<R>>,
    registrations: Vec<Registration<R>>,
}
impl<R: Record> Pipeline<R> {
    pub fn new(notifier: Arc<dyn Notifier<R>>) -> Self {
        Self {
            notifier,
            registrations: Vec::new(),
        }
    }

    pub fn register(
        mut self,
        title: impl Into<String>,
        source: Arc<dyn RecordsSource<R>>,
        snapshot: Snapshot<R>,
    ) -> Self {
        self.registrations.push(Registration {
            title: title.into(),
            source,
            snapshot,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Run once, returning the sections that were sent.
    #[instrument(skip_all, fields(sources = self.registrations.len()))]
    pub async fn run(&self) -> Result<Vec<Section<R>>> {
        let crawls = self.registrations.iter().map(|registration| async move {
            let records = registration
                .source
                .extract()
                .await
                .or_raise(|| ErrorKind::Extract(registration.title.clone()))?;
            tracing::debug!(title = registration.title.as_str(), records = records.len(), "Crawl complete");
            Ok::<_, crate::error::Error>(records)
        });
        let crawled = try_join_all(crawls).await?;

        let mut sections = Vec::with_capacity(self.registrations.len());
        for (registration, fresh) in self.registrations.iter().zip(crawled) {
            sections.push(Self::process(registration, fresh).await?);
        }

        self.notifier.send(&sections).await.or_raise(|| ErrorKind::Notify)?;
        tracing::info!("Run complete");
        Ok(sections)
    }

    #[instrument(
        skip_all,
        fields(title = registration.title.as_str(), location = %registration.snapshot.location().display())
    )]
    async fn process(registration: &Registration<R>, fresh: RecordsCollection<R>) -> Result<Section<R>> {
        let title = &registration.title;
        let prior = registration.snapshot.load().await.or_raise(|| ErrorKind::Load(title.clone()))?;
        let new = fresh.difference(&prior);
        registration.snapshot.save(&fresh).await.or_raise(|| ErrorKind::Save(title.clone()))?;
        tracing::info!(seen = fresh.len(), previously = prior.len(), new = new.len(), "Snapshot updated");
        Ok(Section::new(title.clone(), new))
    }
}
