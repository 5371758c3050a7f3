//! Turning a [`Config`] into a runnable [`Pipeline`].

use crate::cli::Args;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use rolba_config::{Config, MarketplaceKind, SourceConfig};
use rolba_extract::sites::{BlackVinylBazar, VinylEmpire};
use rolba_extract::{Fetch, HttpFetcher, Marketplace, MarketplaceSource, RecordsSource};
use rolba_notify::{EmailNotifier, LogNotifier, Notifier, SmtpEmailSender};
use rolba_pipeline::Pipeline;
use rolba_record::{Listing, ListingFactory, ListingMapper};
use rolba_storage::backend::{LocalBackend, ReadOnlyBackend};
use rolba_storage::{BackendHandle, JsonSnapshotStore, Snapshot, SnapshotStore};
use std::sync::Arc;

pub fn pipeline(config: &Config, args: &Args) -> Result<Pipeline> {
    let store = snapshot_store(config, args.dry_run)?;
    let fetcher: Arc<dyn Fetch> = Arc::new(HttpFetcher::new().or_raise(|| ErrorKind::Setup("HTTP client"))?);
    let notifier: Arc<dyn Notifier<Listing>> = if args.sends_email() {
        Arc::new(email_notifier(config)?)
    } else {
        Arc::new(LogNotifier)
    };
    let pipeline = config.sources.iter().fold(Pipeline::new(notifier), |pipeline, source| {
        pipeline.register(
            source.title.clone(),
            records_source(source, fetcher.clone()),
            Snapshot::new(store.clone(), source.snapshot.clone()),
        )
    });
    Ok(pipeline)
}

fn snapshot_store(config: &Config, read_only: bool) -> Result<Arc<dyn SnapshotStore<Listing>>> {
    let directory = config.storage_directory().or_raise(|| ErrorKind::Config)?;
    let directory = std::path::absolute(&directory).or_raise(|| ErrorKind::Setup("snapshot storage"))?;
    tracing::debug!(directory = %directory.display(), read_only, "Snapshot storage");
    let mut backend: BackendHandle =
        Arc::new(LocalBackend::new("snapshots", &directory).or_raise(|| ErrorKind::Setup("snapshot storage"))?);
    if read_only {
        backend = Arc::new(ReadOnlyBackend::new(backend));
    }
    Ok(Arc::new(JsonSnapshotStore::new(backend, ListingFactory, ListingMapper)))
}

fn email_notifier(config: &Config) -> Result<EmailNotifier> {
    let emailing = &config.emailing;
    let sender = SmtpEmailSender::new(&emailing.smtp_url, &emailing.user, &emailing.password)
        .or_raise(|| ErrorKind::Setup("email delivery"))?;
    let notifier = EmailNotifier::new(Arc::new(sender), config.notification.recipients.clone())
        .or_raise(|| ErrorKind::Setup("email delivery"))?
        .with_subject(config.notification.subject.clone());
    Ok(notifier)
}

fn records_source(source: &SourceConfig, fetcher: Arc<dyn Fetch>) -> Arc<dyn RecordsSource<Listing>> {
    match source.marketplace {
        MarketplaceKind::VinylEmpire => {
            let site = source.start_url.clone().map(VinylEmpire::new).unwrap_or_default();
            marketplace_source(site, source, fetcher)
        },
        MarketplaceKind::BlackVinylBazar => {
            let site = source.start_url.clone().map(BlackVinylBazar::new).unwrap_or_default();
            marketplace_source(site, source, fetcher)
        },
    }
}

fn marketplace_source<M: Marketplace + 'static>(
    site: M,
    source: &SourceConfig,
    fetcher: Arc<dyn Fetch>,
) -> Arc<dyn RecordsSource<Listing>> {
    let crawler = MarketplaceSource::new(site, fetcher, ListingFactory);
    match source.max_pages {
        Some(max_pages) => Arc::new(crawler.with_max_pages(max_pages)),
        None => Arc::new(crawler),
    }
}
