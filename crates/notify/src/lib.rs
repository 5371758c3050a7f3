//! Telling a human what is new.
//!
//! A pipeline run ends with one [`Notifier::send`] call carrying a
//! [`Section`] per source. [`EmailNotifier`] renders the sections into an
//! HTML digest and hands it to an [`EmailSender`]; [`LogNotifier`] only logs
//! them.

mod email;
pub mod error;
mod notifier;
mod render;
mod section;
mod smtp;

pub use crate::email::{DEFAULT_SUBJECT, EmailMessage, EmailNotifier, EmailSender};
pub use crate::notifier::{LogNotifier, Notifier};
pub use crate::render::DigestRenderer;
pub use crate::section::Section;
pub use crate::smtp::SmtpEmailSender;
