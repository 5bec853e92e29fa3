use crate::models::EmailSettings;
use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, Message,
    SmtpTransport, Transport,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("Failed to build email message: {0}")]
    Message(String),

    #[error("Failed to send email: {0}")]
    Transport(String),
}

/// Abstraction over the outbound email transport, so the delivery pipeline
/// is testable without a network.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        settings: &EmailSettings,
    ) -> Result<(), SendError>;
}

/// Production mailer: a fresh SMTP transport per send, built from the
/// stored settings. Port 465 means implicit TLS, anything else STARTTLS.
pub struct SmtpMailer;

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        settings: &EmailSettings,
    ) -> Result<(), SendError> {
        let email = Message::builder()
            .from(
                settings
                    .from_header()
                    .parse()
                    .map_err(|e| SendError::Message(format!("Invalid from address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| SendError::Message(format!("Invalid to address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| SendError::Message(e.to_string()))?;

        let creds = Credentials::new(settings.smtp_user.clone(), settings.smtp_password.clone());

        let transport = if settings.smtp_port == 465 {
            SmtpTransport::relay(&settings.smtp_host)
        } else {
            SmtpTransport::starttls_relay(&settings.smtp_host)
        }
        .map_err(|e| SendError::Transport(format!("Failed to create SMTP transport: {}", e)))?
        .port(settings.smtp_port)
        .credentials(creds)
        .build();

        // lettre's SmtpTransport is blocking; keep it off the async runtime
        tokio::task::spawn_blocking(move || transport.send(&email))
            .await
            .map_err(|e| SendError::Transport(format!("Task join error: {}", e)))?
            .map_err(|e| SendError::Transport(format!("SMTP send error: {}", e)))?;

        tracing::info!("Email sent to {}", to);

        Ok(())
    }
}
