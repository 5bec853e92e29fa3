use serde::Deserialize;

pub const EVENT_ORDER_PAID: &str = "order.paid";
pub const EVENT_ORDER_APPROVED: &str = "order.approved";

/// Inbound webhook payload from the commerce platform.
///
/// Every field defaults so that unexpected shapes deserialize instead of
/// failing; validation happens in [`Order::normalize`] after the event
/// filter has run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub data: Option<WebhookData>,
}

impl WebhookPayload {
    /// Only paid/approved order events trigger deliveries
    pub fn is_paid_event(&self) -> bool {
        self.event == EVENT_ORDER_PAID || self.event == EVENT_ORDER_APPROVED
    }

    pub fn into_order(self) -> Option<Order> {
        self.data.and_then(|d| d.order)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookData {
    #[serde(default)]
    pub order: Option<Order>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// The platform sends order numbers as either strings or integers
    #[serde(default)]
    pub number: Option<serde_json::Value>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl OrderItem {
    /// The platform identifier used to match against `Product::external_id`:
    /// the item id when present, otherwise the SKU.
    pub fn external_id(&self) -> Option<String> {
        self.id
            .as_ref()
            .and_then(scalar_to_string)
            .or_else(|| self.sku.clone())
            .filter(|s| !s.is_empty())
    }
}

/// An order that passed boundary validation: customer email is present and
/// well-formed, and loosely typed fields are normalized to strings.
#[derive(Debug, Clone)]
pub struct PaidOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub order_number: String,
    pub total: f64,
    pub created_at: Option<String>,
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn normalize(self) -> Result<PaidOrder, String> {
        let customer = self.customer.unwrap_or_default();
        let customer_email = customer.email.trim().to_string();
        if customer_email.is_empty() {
            return Err("Customer email missing from order".to_string());
        }
        if !email_address::EmailAddress::is_valid(&customer_email) {
            return Err("Customer email is not a valid address".to_string());
        }

        Ok(PaidOrder {
            customer_name: customer.name,
            customer_email,
            order_number: self
                .number
                .as_ref()
                .and_then(scalar_to_string)
                .unwrap_or_default(),
            total: self.total.unwrap_or(0.0),
            created_at: self.created_at.filter(|s| !s.is_empty()),
            items: self.items,
        })
    }
}

fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
