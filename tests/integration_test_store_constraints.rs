mod common;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::TestApp;
use std::sync::Arc;
use venue_booking::{
    domain::{
        models::booking::{Booking, BookingDetails, BookingFilter, BookingInput, NewBooking},
        ports::BookingRepository,
        services::{
            booking_admission::{Admission, BookingRejection, BookingService, BOOKING_CONFLICT_MESSAGE},
            catalog::{CatalogService, EVENT_DELETE_BLOCKED_MESSAGE, VENUE_DELETE_BLOCKED_MESSAGE},
            Deletion,
        },
    },
    error::AppError,
};

/// Reports every venue-day and every venue/event as free, so writes reach
/// the unique index and foreign keys as if a concurrent request had slipped
/// in between check and commit.
struct StaleCountsRepo {
    inner: Arc<dyn BookingRepository>,
}

#[async_trait]
impl BookingRepository for StaleCountsRepo {
    async fn create(&self, booking: &NewBooking) -> Result<Booking, AppError> {
        self.inner.create(booking).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError> {
        self.inner.find_by_id(id).await
    }

    async fn find_details(&self, id: i64) -> Result<Option<BookingDetails>, AppError> {
        self.inner.find_details(id).await
    }

    async fn search(&self, filter: &BookingFilter) -> Result<Vec<BookingDetails>, AppError> {
        self.inner.search(filter).await
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        self.inner.update(booking).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.inner.delete(id).await
    }

    async fn count_for_venue_on(&self, _venue_id: i64, _date: NaiveDate, _excluding: Option<i64>) -> Result<i64, AppError> {
        Ok(0)
    }

    async fn count_by_venue(&self, _venue_id: i64) -> Result<i64, AppError> {
        Ok(0)
    }

    async fn count_by_event(&self, _event_id: i64) -> Result<i64, AppError> {
        Ok(0)
    }
}

fn stale_services(app: &TestApp) -> (BookingService, CatalogService) {
    let bookings: Arc<dyn BookingRepository> = Arc::new(StaleCountsRepo { inner: app.state.booking_repo.clone() });
    let booking_service = BookingService::new(
        app.state.venue_repo.clone(),
        app.state.event_repo.clone(),
        bookings.clone(),
    );
    let catalog_service = CatalogService::new(
        app.state.venue_repo.clone(),
        app.state.event_repo.clone(),
        app.state.event_type_repo.clone(),
        bookings,
    );
    (booking_service, catalog_service)
}

async fn commit(service: &BookingService, input: BookingInput) -> Booking {
    match service.propose_booking(&input, None).await.unwrap() {
        Admission::Committed(b) => b,
        other => panic!("Expected commit, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unique_index_rejection_is_reported_as_conflict() {
    let app = TestApp::new().await;
    let venue = app.create_venue("Grand Hall", 200).await;
    let first = app.create_event("Spring Conference", 1).await;
    let second = app.create_event("Summer Wedding", 2).await;
    let (bookings, _) = stale_services(&app);

    commit(&bookings, BookingInput::new(first.id, venue.id, "2025-06-01")).await;

    let outcome = bookings
        .propose_booking(&BookingInput::new(second.id, venue.id, "2025-06-01"), None)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        Admission::Rejected(BookingRejection::Conflict(BOOKING_CONFLICT_MESSAGE.to_string()))
    );
    assert_eq!(app.booking_count().await, 1);
}

#[tokio::test]
async fn test_unique_index_rejection_on_edit_keeps_original_row() {
    let app = TestApp::new().await;
    let venue = app.create_venue("Grand Hall", 200).await;
    let event = app.create_event("Spring Conference", 1).await;
    let (bookings, _) = stale_services(&app);

    commit(&bookings, BookingInput::new(event.id, venue.id, "2025-06-01")).await;
    let movable = commit(&bookings, BookingInput::new(event.id, venue.id, "2025-06-02")).await;

    let outcome = bookings
        .propose_booking(&BookingInput::new(event.id, venue.id, "2025-06-01"), Some(movable.id))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        Admission::Rejected(BookingRejection::Conflict(BOOKING_CONFLICT_MESSAGE.to_string()))
    );

    let stored = app.state.booking_repo.find_by_id(movable.id).await.unwrap().unwrap();
    assert_eq!(stored.booking_date, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
}

#[tokio::test]
async fn test_foreign_key_blocks_venue_delete() {
    let app = TestApp::new().await;
    let venue = app.create_venue("Grand Hall", 200).await;
    let event = app.create_event("Spring Conference", 1).await;
    let (bookings, catalog) = stale_services(&app);

    commit(&bookings, BookingInput::new(event.id, venue.id, "2025-06-01")).await;

    let deletion = catalog.delete_venue(venue.id).await.unwrap();
    assert_eq!(deletion, Deletion::Blocked(VENUE_DELETE_BLOCKED_MESSAGE.to_string()));
    assert!(app.state.venue_repo.find_by_id(venue.id).await.unwrap().is_some());
    assert_eq!(app.booking_count().await, 1);
}

#[tokio::test]
async fn test_foreign_key_blocks_event_delete() {
    let app = TestApp::new().await;
    let venue = app.create_venue("Grand Hall", 200).await;
    let event = app.create_event("Spring Conference", 1).await;
    let (bookings, catalog) = stale_services(&app);

    commit(&bookings, BookingInput::new(event.id, venue.id, "2025-06-01")).await;

    let deletion = catalog.delete_event(event.id).await.unwrap();
    assert_eq!(deletion, Deletion::Blocked(EVENT_DELETE_BLOCKED_MESSAGE.to_string()));
    assert!(app.state.event_repo.find_by_id(event.id).await.unwrap().is_some());
}
