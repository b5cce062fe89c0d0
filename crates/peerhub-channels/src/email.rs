//! SMTP email sender with built-in template rendering.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use peerhub_core::config::delivery::EmailConfig;
use peerhub_core::error::AppError;
use peerhub_core::result::AppResult;
use peerhub_core::traits::channel::EmailSender;

use super::templates;

/// Email sender over an SMTP relay (STARTTLS).
#[derive(Debug)]
pub struct SmtpEmailSender {
    config: EmailConfig,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailSender {
    /// Build a sender from configuration.
    pub fn new(config: EmailConfig) -> AppResult<Self> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| AppError::configuration(format!("Invalid SMTP relay: {e}")))?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self { config, mailer })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn render_template(&self, name: &str, data: &serde_json::Value) -> AppResult<String> {
        templates::render(name, data)
    }

    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_address)
            .parse()
            .map_err(|e| AppError::configuration(format!("Invalid from address: {e}")))?;
        let to: Mailbox = to
            .parse()
            .map_err(|e| AppError::delivery(format!("Invalid recipient address: {e}")))?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .map_err(|e| AppError::delivery(format!("Failed to build email: {e}")))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| AppError::delivery(format!("SMTP send failed: {e}")))?;

        debug!(subject, "Email sent");
        Ok(())
    }
}
