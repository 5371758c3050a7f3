//! Extraction Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use rolba_record::error::{Error as RecordError, ErrorKind as RecordErrorKind};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTTP client could not be built.
    #[display("failed to build HTTP client")]
    Client,
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[display("request to {_0} failed")]
    Network(#[error(not(source))] String),
    /// The server answered with a non-success status.
    #[display("request to {url} returned HTTP {status}")]
    HttpStatus {
        /// The requested page.
        url: String,
        /// The status code received.
        status: u16,
    },
    /// A URL could not be parsed or resolved against its page.
    #[display("invalid URL: {_0}")]
    InvalidUrl(#[error(not(source))] String),
    /// A required field could not be found in the page.
    #[display("missing required field: {_0}")]
    MissingField(#[error(not(source))] &'static str),
    /// A field was found but could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The offending text.
        value: String,
    },
    /// A scraped listing was rejected by the record factory.
    #[display("listing rejected: {_0}")]
    Record(RecordErrorKind),
}
impl ErrorKind {
    /// Convert a record error into an extraction error, keeping the record
    /// crate's frame as a child in the error tree.
    #[track_caller]
    pub fn record(err: RecordError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Record(inner))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
