use rolba_record::{Listing, Record, RecordsCollection};

/// The records a single source reported as new, under the source's title.
#[derive(Clone, Debug, PartialEq)]
pub struct Section<R: Record = Listing> {
    pub title: String,
    pub records: RecordsCollection<R>,
}
impl<R: Record> Section<R> {
    pub fn new(title: impl Into<String>, records: RecordsCollection<R>) -> Self {
        Self {
            title: title.into(),
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
