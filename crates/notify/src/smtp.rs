//! SMTP delivery with `lettre`.

use crate::email::{EmailMessage, EmailSender};
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::instrument;

/// Sends mail through an authenticated relay over implicit TLS (port 465).
///
/// The login user doubles as the `From` address.
#[derive(Clone)]
pub struct SmtpEmailSender {
    host: String,
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}
impl SmtpEmailSender {
    pub fn new(host: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let host = host.into();
        let user = user.into();
        let from = parse_mailbox(&user)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
            .or_raise(|| ErrorKind::Relay(host.clone()))?
            .credentials(Credentials::new(user, password.into()))
            .build();
        Ok(Self { host, from, transport })
    }

    /// Assemble the MIME message for `email`.
    pub fn message(&self, email: &EmailMessage) -> Result<Message> {
        if email.recipients.is_empty() {
            exn::bail!(ErrorKind::NoRecipients);
        }
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_HTML);
        for recipient in &email.recipients {
            builder = builder.to(parse_mailbox(recipient)?);
        }
        builder.body(email.html.clone()).or_raise(|| ErrorKind::Message)
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address.trim().parse::<Mailbox>().or_raise(|| ErrorKind::Address(address.to_string()))
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    #[instrument(skip_all, fields(host = self.host.as_str(), recipients = email.recipients.len()))]
    async fn send(&self, email: &EmailMessage) -> Result<()> {
        let message = self.message(email)?;
        self.transport.send(message).await.or_raise(|| ErrorKind::Delivery(self.host.clone()))?;
        tracing::debug!("Message accepted by relay");
        Ok(())
    }
}
