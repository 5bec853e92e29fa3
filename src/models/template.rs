use serde::{Deserialize, Serialize};

/// The email template, stored as a singleton. Subject and body may embed
/// `{{variable}}` placeholders resolved per line item at send time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

impl EmailTemplate {
    /// Built-in template used until the operator saves one
    pub fn built_in() -> Self {
        Self {
            subject: "Thanks for your purchase!".to_string(),
            body: "<h1>Thanks for your purchase, {{customer_name}}!</h1>\
                   <p>Your payment has been approved.</p>\
                   <p><strong>Product:</strong> {{product_name}}</p>\
                   <p><a href=\"{{product_link}}\" target=\"_blank\">Access my ebook</a></p>\
                   <p>Order #{{order_number}} - {{order_date}}</p>"
                .to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.subject.trim().is_empty() {
            return Err("Template subject is required".to_string());
        }
        if self.body.trim().is_empty() {
            return Err("Template body is required".to_string());
        }
        Ok(())
    }
}
