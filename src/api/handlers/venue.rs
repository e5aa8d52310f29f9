use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json_body::JsonBody;
use crate::api::dtos::responses::DeletedResponse;
use crate::domain::models::venue::VenueInput;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let venues = state.venue_repo.list().await?;
    Ok(Json(venues))
}

pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let venue = state.venue_repo.find_by_id(venue_id).await?
        .ok_or(AppError::NotFound("Venue not found".into()))?;
    Ok(Json(venue))
}

pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<VenueInput>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.catalog_service.create_venue(&payload).await?;
    Ok(Json(created))
}

pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<i64>,
    JsonBody(payload): JsonBody<VenueInput>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.catalog_service.update_venue(venue_id, &payload).await?;
    info!("Updated venue: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deletion = state.catalog_service.delete_venue(venue_id).await?;
    Ok(Json(DeletedResponse::try_from(deletion)?))
}
