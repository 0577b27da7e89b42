/// SMTP transport
///
/// Generic over the lettre transport so delivery can be exercised with a
/// stub in tests. Production uses an authenticated relay session.
use super::Mailer;
use crate::errors::{DeliveryError, MailerError};
use crate::logger::{self, LogTag};
use crate::report::Report;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::fmt::Display;

const PROVIDER: &str = "Gmail SMTP";

pub struct SmtpMailer<T> {
    user: String,
    transport: T,
}

impl SmtpMailer<AsyncSmtpTransport<Tokio1Executor>> {
    /// Authenticated relay; no connection is made until the first send
    pub fn relay(relay: &str, user: &str, app_password: &str) -> Result<Self, MailerError> {
        let credentials = Credentials::new(user.to_string(), app_password.to_string());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(relay)
            .map_err(|e| MailerError::invalid_config("mail.smtp_relay", e.to_string()))?
            .credentials(credentials)
            .build();

        Ok(Self::with_transport(user, transport))
    }
}

impl<T> SmtpMailer<T> {
    pub fn with_transport(user: &str, transport: T) -> Self {
        Self {
            user: user.to_string(),
            transport,
        }
    }

    /// multipart/alternative message with the login as sender
    fn build_message(&self, report: &Report, recipient: &str) -> Result<Message, MailerError> {
        let from = self
            .user
            .parse::<Mailbox>()
            .map_err(|e| MailerError::invalid_config("GMAIL_USER", e.to_string()))?;
        let to = recipient
            .parse::<Mailbox>()
            .map_err(|e| MailerError::invalid_config("MAIL_TO", e.to_string()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(report.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                report.text.clone(),
                report.html.clone(),
            ))
            .map_err(|e| {
                DeliveryError::TransportFailed {
                    provider: PROVIDER.to_string(),
                    message: e.to_string(),
                }
                .into()
            })
    }
}

#[async_trait]
impl<T> Mailer for SmtpMailer<T>
where
    T: AsyncTransport + Send + Sync,
    T::Error: Display,
{
    async fn send(&self, report: &Report, recipient: &str) -> Result<(), MailerError> {
        let message = self.build_message(report, recipient)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::TransportFailed {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        logger::debug(LogTag::Mail, "SMTP relay accepted message");
        Ok(())
    }
}

#[cfg(test)]
impl SmtpMailer<lettre::transport::stub::AsyncStubTransport> {
    pub(crate) async fn stub_messages(&self) -> Vec<(lettre::address::Envelope, String)> {
        self.transport.messages().await
    }
}
