//! Email delivery of the digest.

use crate::error::{ErrorKind, Result};
use crate::render::DigestRenderer;
use crate::{Notifier, Section};
use async_trait::async_trait;
use rolba_record::Record;
use std::sync::Arc;
use time::{Date, UtcDateTime};
use tracing::instrument;

/// Default subject line of the digest email.
pub const DEFAULT_SUBJECT: &str = "Vinyl records notification";

/// A fully rendered HTML email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    pub recipients: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Hands a rendered message over to a mail system.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Renders the digest as HTML and sends it as a single email to every
/// recipient.
pub struct EmailNotifier {
    sender: Arc<dyn EmailSender>,
    renderer: DigestRenderer,
    subject: String,
    recipients: Vec<String>,
}
impl EmailNotifier {
    /// Uses the built-in layout and [`DEFAULT_SUBJECT`].
    pub fn new(sender: Arc<dyn EmailSender>, recipients: Vec<String>) -> Result<Self> {
        if recipients.is_empty() {
            exn::bail!(ErrorKind::NoRecipients);
        }
        Ok(Self {
            sender,
            renderer: DigestRenderer::builtin()?,
            subject: DEFAULT_SUBJECT.to_string(),
            recipients,
        })
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_renderer(mut self, renderer: DigestRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Build the message for a digest dated `date`.
    pub fn compose<R: Record>(&self, sections: &[Section<R>], date: Date) -> Result<EmailMessage> {
        Ok(EmailMessage {
            recipients: self.recipients.clone(),
            subject: self.subject.clone(),
            html: self.renderer.render(sections, date)?,
        })
    }
}

#[async_trait]
impl<R: Record> Notifier<R> for EmailNotifier {
    #[instrument(skip_all, fields(sections = sections.len(), recipients = self.recipients.len()))]
    async fn send(&self, sections: &[Section<R>]) -> Result<()> {
        let message = self.compose(sections, UtcDateTime::now().date())?;
        self.sender.send(&message).await?;
        tracing::info!(subject = message.subject.as_str(), "Digest sent");
        Ok(())
    }
}
