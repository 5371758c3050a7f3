//! Record Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// A record error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for record operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A raw record does not satisfy the `{name, price, link}` schema. The
    /// offending payload is kept verbatim so it shows up in logs.
    #[display("invalid record schema ({reason}), payload: {payload}")]
    Schema {
        /// Which rule the payload broke.
        reason: &'static str,
        /// The raw payload, serialized back to JSON.
        payload: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A payload is either valid or it isn't.
        false
    }
}
