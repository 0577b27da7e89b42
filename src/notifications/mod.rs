//! Mail dispatcher
//!
//! Delivers a formatted report through the configured transport. The
//! recipient and the transport credentials are checked before anything
//! touches the network; delivery is attempted once with no retry.

pub mod resend;
pub mod smtp;
pub mod types;

pub use resend::ResendMailer;
pub use smtp::SmtpMailer;
pub use types::{DeliverySettings, MailProvider, MailTransportConfig};

use crate::apis::HttpClient;
use crate::errors::MailerError;
use crate::logger::{self, LogTag};
use crate::report::Report;
use async_trait::async_trait;
use lettre::message::Mailbox;

/// A transport able to deliver one report to one recipient
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, report: &Report, recipient: &str) -> Result<(), MailerError>;
}

/// Reject an empty or malformed recipient
pub fn validate_recipient(recipient: &str) -> Result<&str, MailerError> {
    let recipient = recipient.trim();
    if recipient.is_empty() {
        return Err(MailerError::missing_config("MAIL_TO"));
    }
    recipient
        .parse::<Mailbox>()
        .map_err(|e| MailerError::invalid_config("MAIL_TO", e.to_string()))?;
    Ok(recipient)
}

/// Instantiate the transport selected by `transport`
pub fn build_mailer(
    transport: &MailTransportConfig,
    settings: &DeliverySettings,
) -> Result<Box<dyn Mailer>, MailerError> {
    match transport {
        MailTransportConfig::Smtp { user, app_password } => Ok(Box::new(SmtpMailer::relay(
            &settings.smtp_relay,
            user,
            app_password,
        )?)),
        MailTransportConfig::Api {
            api_key,
            from_address,
        } => {
            let http_client =
                HttpClient::new(0).map_err(|e| MailerError::invalid_config("mail", e))?;
            Ok(Box::new(ResendMailer::new(
                http_client,
                &settings.api_url,
                api_key,
                from_address,
            )))
        }
    }
}

/// Send `report` to `recipient` through `transport`
pub async fn send(
    report: &Report,
    transport: &MailTransportConfig,
    recipient: &str,
    settings: &DeliverySettings,
) -> Result<(), MailerError> {
    validate_recipient(recipient)?;
    transport.check_credentials()?;

    let mailer = build_mailer(transport, settings)?;
    send_via(mailer.as_ref(), report, transport, recipient).await
}

/// Same checks as [`send`], delivering through an already built mailer
pub async fn send_via(
    mailer: &dyn Mailer,
    report: &Report,
    transport: &MailTransportConfig,
    recipient: &str,
) -> Result<(), MailerError> {
    let recipient = validate_recipient(recipient)?;
    transport.check_credentials()?;

    deliver(mailer, transport.provider(), report, recipient).await
}

/// Single delivery attempt through an already built mailer
pub async fn deliver(
    mailer: &dyn Mailer,
    provider: MailProvider,
    report: &Report,
    recipient: &str,
) -> Result<(), MailerError> {
    logger::info(
        LogTag::Mail,
        &format!(
            "Sending '{}' to {} via {}",
            report.subject,
            recipient,
            provider.display_name()
        ),
    );

    mailer.send(report, recipient).await?;

    logger::info(
        LogTag::Mail,
        &format!("Email sent successfully via {}", provider.display_name()),
    );
    Ok(())
}
