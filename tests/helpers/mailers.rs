use async_trait::async_trait;
use bookdrop::models::EmailSettings;
use bookdrop::services::{Mailer, SendError};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Captures sent messages in memory for assertions
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_messages(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        _settings: &EmailSettings,
    ) -> Result<(), SendError> {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: html_body.to_string(),
        });
        Ok(())
    }
}

/// Fails any send whose subject or body mentions the needle; records the rest
pub struct FailOnMailer {
    needle: String,
    sent: Mutex<Vec<SentEmail>>,
}

impl FailOnMailer {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_messages(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for FailOnMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        _settings: &EmailSettings,
    ) -> Result<(), SendError> {
        if subject.contains(&self.needle) || html_body.contains(&self.needle) {
            return Err(SendError::Transport(
                "SMTP send error: connection refused".to_string(),
            ));
        }

        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: html_body.to_string(),
        });
        Ok(())
    }
}
