use serde::{Deserialize, Serialize};

/// SMTP sender settings, stored as a singleton and overwritten wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSettings {
    #[serde(default)]
    pub sender_name: String,
    pub sender_email: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
}

impl EmailSettings {
    /// `From` header value: display name falls back to the sender address
    pub fn from_header(&self) -> String {
        let name = if self.sender_name.trim().is_empty() {
            &self.sender_email
        } else {
            &self.sender_name
        };
        format!("{} <{}>", name, self.sender_email)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.smtp_host.trim().is_empty() {
            return Err("smtpHost is required".to_string());
        }
        if self.smtp_port == 0 {
            return Err("smtpPort must be a valid port number".to_string());
        }
        if self.smtp_user.trim().is_empty() {
            return Err("smtpUser is required".to_string());
        }
        if self.smtp_password.is_empty() {
            return Err("smtpPassword is required".to_string());
        }
        if !email_address::EmailAddress::is_valid(self.sender_email.trim()) {
            return Err("senderEmail must be a valid email address".to_string());
        }
        Ok(())
    }
}

/// Save request: tolerant of string ports (admin forms post them as text)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsRequest {
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub smtp_host: String,
    #[serde(default)]
    pub smtp_port: Option<serde_json::Value>,
    #[serde(default)]
    pub smtp_user: String,
    #[serde(default)]
    pub smtp_password: String,
}

impl SaveSettingsRequest {
    pub fn into_settings(self) -> Result<EmailSettings, String> {
        let smtp_port = self
            .smtp_port
            .as_ref()
            .and_then(port_from_value)
            .ok_or_else(|| "smtpPort is required and must be a port number".to_string())?;

        let settings = EmailSettings {
            sender_name: self.sender_name.trim().to_string(),
            sender_email: self.sender_email.trim().to_string(),
            smtp_host: self.smtp_host.trim().to_string(),
            smtp_port,
            smtp_user: self.smtp_user,
            smtp_password: self.smtp_password,
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn port_from_value(value: &serde_json::Value) -> Option<u16> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
