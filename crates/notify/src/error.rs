//! Notification Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// A notification error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for notification operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The digest template does not compile.
    #[display("invalid digest template")]
    Template,
    /// The digest template failed to render.
    #[display("failed to render digest")]
    Render,
    /// A sender or recipient is not a valid mailbox.
    #[display("invalid email address: {_0}")]
    Address(#[error(not(source))] String),
    /// The message could not be assembled.
    #[display("failed to build email message")]
    Message,
    /// There is nobody to send the digest to.
    #[display("no recipients configured")]
    NoRecipients,
    /// The SMTP transport could not be configured for a host.
    #[display("invalid SMTP relay: {_0}")]
    Relay(#[error(not(source))] String),
    /// The SMTP exchange failed.
    #[display("failed to deliver email via {_0}")]
    Delivery(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Delivery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        assert!(ErrorKind::Delivery("smtp.example.com".into()).is_retryable());
        assert!(!ErrorKind::Address("nobody".into()).is_retryable());
        assert!(!ErrorKind::Template.is_retryable());
    }
}
