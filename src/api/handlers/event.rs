use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json_body::JsonBody;
use crate::api::dtos::responses::DeletedResponse;
use crate::domain::models::event::EventInput;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<EventInput>,
) -> Result<impl IntoResponse, AppError> {
    info!("Creating event: {:?}", payload.name);
    let created = state.catalog_service.create_event(&payload, Utc::now()).await?;
    Ok(Json(created))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
    JsonBody(payload): JsonBody<EventInput>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.catalog_service.update_event(event_id, &payload, Utc::now()).await?;
    info!("Updated event: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deletion = state.catalog_service.delete_event(event_id).await?;
    Ok(Json(DeletedResponse::try_from(deletion)?))
}
