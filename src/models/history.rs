use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendStatus {
    Success,
    Error,
}

impl SendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendStatus::Success => "success",
            SendStatus::Error => "error",
        }
    }
}

impl fmt::Display for SendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Convert from string (for the relational store)
impl From<String> for SendStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "error" => SendStatus::Error,
            _ => SendStatus::Success,
        }
    }
}

/// One immutable record of an attempted email send for one order line item.
///
/// Invariant: `status == Error` entries always carry a non-empty
/// `error_message`; `status == Success` entries never do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub created_at: String, // RFC 3339
    pub customer_name: String,
    pub customer_email: String,
    pub order_number: String,
    pub total: f64,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_link: Option<String>,
    pub status: SendStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Order-level fields shared by every entry of one webhook batch.
#[derive(Debug, Clone)]
pub struct EntryContext {
    pub customer_name: String,
    pub customer_email: String,
    pub order_number: String,
    pub total: f64,
}

impl HistoryEntry {
    pub fn success(ctx: &EntryContext, product_name: &str, product_link: &str) -> Self {
        Self::build(ctx, product_name, product_link, SendStatus::Success, None)
    }

    pub fn error(
        ctx: &EntryContext,
        product_name: &str,
        product_link: &str,
        message: String,
    ) -> Self {
        let message = if message.trim().is_empty() {
            "Failed to send email".to_string()
        } else {
            message
        };
        Self::build(
            ctx,
            product_name,
            product_link,
            SendStatus::Error,
            Some(message),
        )
    }

    fn build(
        ctx: &EntryContext,
        product_name: &str,
        product_link: &str,
        status: SendStatus,
        error_message: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            customer_name: ctx.customer_name.clone(),
            customer_email: ctx.customer_email.clone(),
            order_number: ctx.order_number.clone(),
            total: ctx.total,
            product_name: product_name.to_string(),
            product_link: Some(product_link)
                .filter(|l| !l.is_empty())
                .map(String::from),
            status,
            error_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> EntryContext {
        EntryContext {
            customer_name: "Ana".to_string(),
            customer_email: "ana@example.com".to_string(),
            order_number: "1042".to_string(),
            total: 19.9,
        }
    }

    #[test]
    fn test_error_entry_always_has_message() {
        let entry = HistoryEntry::error(&ctx(), "Rust Book", "", String::new());
        assert_eq!(entry.status, SendStatus::Error);
        assert!(!entry.error_message.as_deref().unwrap().is_empty());
    }

    #[test]
    fn test_success_entry_has_no_message() {
        let entry = HistoryEntry::success(&ctx(), "Rust Book", "https://example.com/book");
        assert_eq!(entry.status, SendStatus::Success);
        assert!(entry.error_message.is_none());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let entry = HistoryEntry::success(&ctx(), "Rust Book", "");
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("customerEmail").is_some());
        assert_eq!(value.get("status").unwrap(), "success");
        // empty link and absent error are omitted from the wire form
        assert!(value.get("productLink").is_none());
        assert!(value.get("errorMessage").is_none());
    }
}
