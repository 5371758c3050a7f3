use crate::Section;
use crate::error::Result;
use async_trait::async_trait;
use rolba_record::Record;
use tracing::instrument;

/// Delivers the digest of one pipeline run.
///
/// Called exactly once per successful run, with one section per source in
/// registration order, including sections without new records.
#[async_trait]
pub trait Notifier<R: Record>: Send + Sync {
    async fn send(&self, sections: &[Section<R>]) -> Result<()>;
}

/// Writes the digest to the log instead of delivering it anywhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl<R: Record> Notifier<R> for LogNotifier {
    #[instrument(skip_all, fields(sections = sections.len()))]
    async fn send(&self, sections: &[Section<R>]) -> Result<()> {
        for section in sections {
            if section.is_empty() {
                tracing::info!(title = section.title.as_str(), "No new records");
                continue;
            }
            tracing::info!(title = section.title.as_str(), new = section.records.len(), "New records");
            for record in &section.records {
                tracing::info!(title = section.title.as_str(), "{record}");
            }
        }
        Ok(())
    }
}
