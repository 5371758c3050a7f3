//! Pipeline Error Types

use derive_more::{Display, Error};

/// A pipeline error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for pipeline runs.
pub type Result<T> = std::result::Result<T, Error>;

/// Which step of the run failed, and for which source.
///
/// The underlying extraction, storage or notification error is kept as the
/// child in the error tree.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("crawling '{_0}' failed")]
    Extract(#[error(not(source))] String),
    #[display("loading the snapshot of '{_0}' failed")]
    Load(#[error(not(source))] String),
    #[display("saving the snapshot of '{_0}' failed")]
    Save(#[error(not(source))] String),
    #[display("sending the notification failed")]
    Notify,
}

impl ErrorKind {
    /// Returns `true` if rerunning might succeed without losing anything.
    ///
    /// Snapshots are saved before the notification is sent, so a rerun after
    /// [`Notify`](Self::Notify) would report nothing new.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Extract(_))
    }

    /// Title of the source the failure belongs to, if any.
    pub fn source_title(&self) -> Option<&str> {
        match self {
            Self::Extract(title) | Self::Load(title) | Self::Save(title) => Some(title),
            Self::Notify => None,
        }
    }
}
