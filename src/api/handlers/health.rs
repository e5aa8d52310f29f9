use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use std::sync::Arc;

pub async fn health_check(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let event_types = state.event_type_repo.list().await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "event_types": event_types.len(),
    })))
}
