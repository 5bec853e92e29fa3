use crate::api::error::{ApiError, ApiResult};
use crate::models::{
    EmailTemplate, EntryContext, HistoryEntry, OrderItem, PaidOrder, Product, SendStatus,
    WebhookPayload,
};
use crate::services::mailer::Mailer;
use crate::services::renderer::render;
use crate::store::Store;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Event is not a paid/approved order; nothing was done
    Ignored,
    Processed { attempted: usize, failed: usize },
}

/// Turns one paid-order webhook into per-item emails and history entries.
///
/// Items are processed independently in payload order: a failed send is
/// recorded as an error entry and never aborts the remaining items. The
/// whole batch is appended to history once, after the loop.
#[derive(Clone)]
pub struct DeliveryService {
    store: Arc<dyn Store>,
    mailer: Arc<dyn Mailer>,
}

impl DeliveryService {
    pub fn new(store: Arc<dyn Store>, mailer: Arc<dyn Mailer>) -> Self {
        Self { store, mailer }
    }

    pub async fn handle_event(&self, payload: WebhookPayload) -> ApiResult<WebhookOutcome> {
        if !payload.is_paid_event() {
            tracing::debug!("Ignoring webhook event '{}'", payload.event);
            return Ok(WebhookOutcome::Ignored);
        }

        let order = payload
            .into_order()
            .ok_or_else(|| ApiError::BadRequest("Order missing from payload".to_string()))?;
        let order = order.normalize().map_err(ApiError::BadRequest)?;

        let products = self.store.list_products().await?;
        let template = self
            .store
            .get_template()
            .await?
            .unwrap_or_else(EmailTemplate::built_in);
        // SMTP settings gate the whole batch, not individual items
        let settings = self.store.get_settings().await?.ok_or_else(|| {
            ApiError::Precondition("Email settings are not configured".to_string())
        })?;

        let ctx = EntryContext {
            customer_name: order.customer_name.clone(),
            customer_email: order.customer_email.clone(),
            order_number: order.order_number.clone(),
            total: order.total,
        };

        let mut entries = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let (product_name, product_link) = match match_product(&products, item) {
                Some(product) => (product.name.clone(), product.link.clone()),
                None => (item.name.clone(), String::new()),
            };

            let vars = build_variables(&order, &product_name, &product_link);
            let subject = render(&template.subject, &vars);
            let body = render(&template.body, &vars);

            let entry = match self
                .mailer
                .send(&order.customer_email, &subject, &body, &settings)
                .await
            {
                Ok(()) => HistoryEntry::success(&ctx, &product_name, &product_link),
                Err(err) => {
                    tracing::warn!(
                        "Email send failed for '{}' (order {}): {}",
                        product_name,
                        order.order_number,
                        err
                    );
                    HistoryEntry::error(&ctx, &product_name, &product_link, err.to_string())
                }
            };
            entries.push(entry);
        }

        self.store.append_history(&entries).await?;

        let failed = entries
            .iter()
            .filter(|e| e.status == SendStatus::Error)
            .count();
        tracing::info!(
            "Order {} processed: {} item(s), {} failed",
            order.order_number,
            entries.len(),
            failed
        );

        Ok(WebhookOutcome::Processed {
            attempted: entries.len(),
            failed,
        })
    }
}

/// Catalog match for one line item: the platform identifier wins when both
/// sides carry one, then exact name equality. First match wins; no match
/// means the item is delivered under its own name with no link.
pub fn match_product<'a>(products: &'a [Product], item: &OrderItem) -> Option<&'a Product> {
    if let Some(item_ext) = item.external_id() {
        if let Some(product) = products
            .iter()
            .find(|p| p.external_id.as_deref() == Some(item_ext.as_str()))
        {
            return Some(product);
        }
    }

    products.iter().find(|p| p.name == item.name)
}

pub fn build_variables(
    order: &PaidOrder,
    product_name: &str,
    product_link: &str,
) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    vars.insert("customer_name".to_string(), order.customer_name.clone());
    vars.insert("customer_email".to_string(), order.customer_email.clone());
    vars.insert("product_name".to_string(), product_name.to_string());
    vars.insert("product_link".to_string(), product_link.to_string());
    vars.insert("order_number".to_string(), order.order_number.clone());
    vars.insert("total".to_string(), format!("{:.2}", order.total));
    vars.insert(
        "order_date".to_string(),
        format_order_date(order.created_at.as_deref()),
    );
    vars
}

/// DD/MM/YYYY from the order's RFC 3339 timestamp; today when the payload
/// carries none, the raw date part when it carries something unparsable.
fn format_order_date(created_at: Option<&str>) -> String {
    match created_at {
        Some(raw) => chrono::DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|_| raw.chars().take(10).collect()),
        None => chrono::Utc::now().format("%d/%m/%Y").to_string(),
    }
}
