use axum::{extract::State, Json};

use crate::{
    api::{error::ApiResult, AppState},
    models::HistoryEntry,
};

/// Display cap: only the most recent sends are listed
const HISTORY_LIMIT: i64 = 100;

/// GET /api/history - Send history, newest first
pub async fn list_history(State(state): State<AppState>) -> ApiResult<Json<Vec<HistoryEntry>>> {
    let entries = state.store.list_history(HISTORY_LIMIT).await?;
    Ok(Json(entries))
}
