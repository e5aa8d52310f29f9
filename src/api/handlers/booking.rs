use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json_body::JsonBody;
use crate::api::dtos::{requests::BookingListQuery, responses::DeletedResponse};
use crate::domain::models::booking::BookingInput;
use crate::domain::services::booking_admission::Admission;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<BookingInput>,
) -> Result<impl IntoResponse, AppError> {
    info!("create_booking: venue {:?} event {:?} on {:?}", payload.venue_id, payload.event_id, payload.booking_date);

    match state.booking_service.propose_booking(&payload, None).await? {
        Admission::Committed(booking) => Ok(Json(booking)),
        Admission::Rejected(rejection) => Err(rejection.into()),
    }
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.into_filter()?;
    let bookings = state.booking_repo.search(&filter).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_details(booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
    JsonBody(payload): JsonBody<BookingInput>,
) -> Result<impl IntoResponse, AppError> {
    state.booking_repo.find_by_id(booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    match state.booking_service.propose_booking(&payload, Some(booking_id)).await? {
        Admission::Committed(booking) => {
            info!("Booking {} rescheduled to venue {} on {}", booking.id, booking.venue_id, booking.booking_date);
            Ok(Json(booking))
        }
        Admission::Rejected(rejection) => Err(rejection.into()),
    }
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deletion = state.booking_service.delete_booking(booking_id).await?;
    Ok(Json(DeletedResponse::try_from(deletion)?))
}
