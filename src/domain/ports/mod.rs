use crate::domain::models::{
    booking::{Booking, BookingDetails, BookingFilter, NewBooking},
    event::{Event, NewEvent},
    event_type::EventType,
    venue::{NewVenue, Venue},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn create(&self, venue: &NewVenue) -> Result<Venue, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Venue>, AppError>;
    async fn list(&self) -> Result<Vec<Venue>, AppError>;
    async fn update(&self, venue: &Venue) -> Result<Venue, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait EventTypeRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<EventType>, AppError>;
    async fn list(&self) -> Result<Vec<EventType>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &NewEvent) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &NewBooking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError>;
    async fn find_details(&self, id: i64) -> Result<Option<BookingDetails>, AppError>;
    async fn search(&self, filter: &BookingFilter) -> Result<Vec<BookingDetails>, AppError>;
    async fn update(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    /// Bookings for `venue_id` on `date`, ignoring `excluding` when given.
    async fn count_for_venue_on(&self, venue_id: i64, date: NaiveDate, excluding: Option<i64>) -> Result<i64, AppError>;
    async fn count_by_venue(&self, venue_id: i64) -> Result<i64, AppError>;
    async fn count_by_event(&self, event_id: i64) -> Result<i64, AppError>;
}
