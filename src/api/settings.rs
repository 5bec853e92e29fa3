use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    api::{
        error::{ApiError, ApiResult},
        AppState,
    },
    models::{EmailSettings, SaveSettingsRequest},
};

/// GET /api/settings - Current SMTP settings, `{}` when never saved
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    match state.store.get_settings().await? {
        Some(settings) => {
            let value = serde_json::to_value(settings)
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            Ok(Json(value))
        }
        None => Ok(Json(json!({}))),
    }
}

/// POST /api/settings - Overwrite the settings singleton
pub async fn save_settings(
    State(state): State<AppState>,
    Json(req): Json<SaveSettingsRequest>,
) -> ApiResult<Json<EmailSettings>> {
    let settings = req.into_settings().map_err(ApiError::BadRequest)?;

    state.store.save_settings(&settings).await?;

    tracing::info!(
        "Email settings saved: host={}, port={}",
        settings.smtp_host,
        settings.smtp_port
    );
    Ok(Json(settings))
}
