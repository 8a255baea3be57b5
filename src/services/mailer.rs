//! SMTP notifier.
//!
//! Sends plain-text mail through a STARTTLS relay with username/password
//! authentication.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::Notifier;
use crate::error::{AppError, Result};
use crate::models::{Credentials, MailConfig};

/// Notifier backed by an async SMTP transport.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Build the transport and sender mailbox.
    ///
    /// Nothing is sent or connected here; an unparsable sender address or
    /// relay host is reported as a configuration error.
    pub fn new(config: &MailConfig, credentials: &Credentials) -> Result<Self> {
        let from: Mailbox = credentials.username.parse().map_err(|e| {
            AppError::config(format!(
                "USER_EMAIL '{}' is not a mail address: {e}",
                credentials.username
            ))
        })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| {
                AppError::config(format!("Invalid SMTP host '{}': {e}", config.smtp_host))
            })?
            .port(config.smtp_port)
            .credentials(SmtpCredentials::new(
                credentials.username.clone(),
                credentials.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self { transport, from })
    }
}

/// Build a single plain-text message.
pub(crate) fn build_message(
    from: &Mailbox,
    recipient: &str,
    subject: &str,
    body: &str,
) -> Result<Message> {
    let to: Mailbox = recipient.parse()?;
    let message = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())?;
    Ok(message)
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        let message = build_message(&self.from, recipient, subject, body)?;
        self.transport.send(message).await?;
        log::info!("Email sent successfully to {}", recipient);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("sender@example.com", "app-password").unwrap()
    }

    #[test]
    fn test_new_parses_sender() {
        let notifier = SmtpNotifier::new(&MailConfig::default(), &credentials()).unwrap();
        assert_eq!(notifier.from.email.to_string(), "sender@example.com");
    }

    #[test]
    fn test_new_rejects_invalid_sender() {
        let credentials = Credentials::new("not-an-address", "app-password").unwrap();
        let err = SmtpNotifier::new(&MailConfig::default(), &credentials)
            .err()
            .unwrap();
        assert!(err.is_startup());
    }

    #[test]
    fn test_build_message_is_plain_text() {
        let from: Mailbox = "sender@example.com".parse().unwrap();
        let message = build_message(
            &from,
            "me@example.com",
            "Website Update Detected",
            "Program Code: ABC123",
        )
        .unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("From: sender@example.com"));
        assert!(raw.contains("To: me@example.com"));
        assert!(raw.contains("Subject: Website Update Detected"));
        assert!(raw.contains("Content-Type: text/plain"));
        assert!(raw.contains("Program Code: ABC123"));
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let from: Mailbox = "sender@example.com".parse().unwrap();
        let result = build_message(&from, "nobody", "s", "b");
        assert!(matches!(result, Err(AppError::Address(_))));
    }
}
