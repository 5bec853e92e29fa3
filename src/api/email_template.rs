use axum::{extract::State, Json};

use crate::{
    api::{
        error::{ApiError, ApiResult},
        AppState,
    },
    models::EmailTemplate,
};

/// GET /api/email-template - Stored template, or the built-in default
pub async fn get_template(State(state): State<AppState>) -> ApiResult<Json<EmailTemplate>> {
    let template = state
        .store
        .get_template()
        .await?
        .unwrap_or_else(EmailTemplate::built_in);
    Ok(Json(template))
}

/// POST /api/email-template - Overwrite the template singleton
pub async fn save_template(
    State(state): State<AppState>,
    Json(template): Json<EmailTemplate>,
) -> ApiResult<Json<EmailTemplate>> {
    template.validate().map_err(ApiError::BadRequest)?;

    state.store.save_template(&template).await?;

    tracing::info!("Email template saved");
    Ok(Json(template))
}
