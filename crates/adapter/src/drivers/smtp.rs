use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use domain::ports::EmailDelivery;
use domain::protocol::VerificationEmail;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::common::sender::format_sender;

pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone)]
pub struct SmtpMailerConfig {
    pub host: String,
    pub port: u16,
    /// TLS from the first byte (port 465 style). Otherwise the session is
    /// upgraded with STARTTLS.
    pub secure: bool,
    pub user: String,
    pub password: String,
    /// Only the display name is used; the address is always `user`.
    pub from_name: Option<String>,
    pub timeout: Duration,
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: SmtpMailerConfig) -> Result<Self> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .with_context(|| format!("Invalid SMTP host: {}", config.host))?;

        let sender = format_sender(config.from_name.as_deref(), &config.user);
        let from = sender
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid sender: {}", sender))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(config.user, config.password))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self { transport, from })
    }

    fn message(&self, email: &VerificationEmail) -> Result<Message> {
        let to = email
            .to
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid recipient: {}", email.to))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .context("Failed to build verification email")
    }
}

#[async_trait]
impl EmailDelivery for SmtpMailer {
    async fn send(&self, email: &VerificationEmail) -> Result<()> {
        let message = self.message(email)?;
        self.transport
            .send(message)
            .await
            .with_context(|| format!("SMTP delivery to {} failed", email.to))?;

        info!("Verification email sent to {}", email.to);
        Ok(())
    }
}
