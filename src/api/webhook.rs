use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    api::{error::ApiResult, AppState},
    models::WebhookPayload,
    services::{DeliveryService, WebhookOutcome},
};

/// POST /api/webhook/yampi - Inbound purchase event from the commerce
/// platform. Responds 200 whenever the request itself was processed;
/// per-item send failures only show up in the history, never in the
/// response status.
pub async fn receive_order_event(
    State(state): State<AppState>,
    Json(payload): Json<WebhookPayload>,
) -> ApiResult<Json<Value>> {
    let service = DeliveryService::new(state.store.clone(), state.mailer.clone());

    match service.handle_event(payload).await? {
        WebhookOutcome::Ignored => Ok(Json(json!({"ok": true, "message": "Event ignored"}))),
        WebhookOutcome::Processed { .. } => Ok(Json(json!({"ok": true}))),
    }
}
