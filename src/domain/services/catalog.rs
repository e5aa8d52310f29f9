use crate::domain::models::{
    event::{Event, EventInput},
    venue::{Venue, VenueInput},
};
use crate::domain::ports::{BookingRepository, EventRepository, EventTypeRepository, VenueRepository};
use crate::domain::services::Deletion;
use crate::domain::validation::FieldErrors;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

pub const VENUE_DELETE_BLOCKED_MESSAGE: &str = "Cannot delete venue with active bookings.";
pub const EVENT_DELETE_BLOCKED_MESSAGE: &str = "Cannot delete event with existing bookings.";
pub const EVENT_TYPE_NOT_FOUND_MESSAGE: &str = "Selected event type does not exist";

/// Administrative management of venues and events.
pub struct CatalogService {
    venue_repo: Arc<dyn VenueRepository>,
    event_repo: Arc<dyn EventRepository>,
    event_type_repo: Arc<dyn EventTypeRepository>,
    booking_repo: Arc<dyn BookingRepository>,
}

impl CatalogService {
    pub fn new(
        venue_repo: Arc<dyn VenueRepository>,
        event_repo: Arc<dyn EventRepository>,
        event_type_repo: Arc<dyn EventTypeRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        Self { venue_repo, event_repo, event_type_repo, booking_repo }
    }

    pub async fn create_venue(&self, input: &VenueInput) -> Result<Venue, AppError> {
        let draft = input.to_new_venue()?;
        let created = self.venue_repo.create(&draft).await?;
        info!("Created venue: {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update_venue(&self, venue_id: i64, input: &VenueInput) -> Result<Venue, AppError> {
        let existing = self.venue_repo.find_by_id(venue_id).await?
            .ok_or(AppError::NotFound("Venue not found".into()))?;
        let draft = input.to_new_venue()?;
        self.venue_repo.update(&existing.replaced_with(draft)).await
    }

    pub async fn create_event(&self, input: &EventInput, now: DateTime<Utc>) -> Result<Event, AppError> {
        let draft = input.to_new_event(now, None)?;
        self.ensure_event_type(draft.event_type_id).await?;

        match self.event_repo.create(&draft).await {
            Ok(created) => {
                info!("Created event: {} ({}) on {}", created.id, created.name, created.event_date);
                Ok(created)
            }
            Err(e) if e.is_foreign_key_violation() => Err(event_type_missing()),
            Err(e) => Err(e),
        }
    }

    pub async fn update_event(&self, event_id: i64, input: &EventInput, now: DateTime<Utc>) -> Result<Event, AppError> {
        let existing = self.event_repo.find_by_id(event_id).await?
            .ok_or(AppError::NotFound("Event not found".into()))?;
        let draft = input.to_new_event(now, Some(existing.event_date))?;
        self.ensure_event_type(draft.event_type_id).await?;

        match self.event_repo.update(&existing.replaced_with(draft)).await {
            Err(e) if e.is_foreign_key_violation() => Err(event_type_missing()),
            other => other,
        }
    }

    async fn ensure_event_type(&self, event_type_id: i64) -> Result<(), AppError> {
        match self.event_type_repo.find_by_id(event_type_id).await? {
            Some(_) => Ok(()),
            None => Err(event_type_missing()),
        }
    }

    /// Refuses while any booking references the venue; the store's foreign
    /// key catches bookings that arrive between the check and the delete.
    pub async fn delete_venue(&self, venue_id: i64) -> Result<Deletion, AppError> {
        if self.venue_repo.find_by_id(venue_id).await?.is_none() {
            return Ok(Deletion::AlreadyAbsent);
        }
        if self.booking_repo.count_by_venue(venue_id).await? > 0 {
            return Ok(Deletion::Blocked(VENUE_DELETE_BLOCKED_MESSAGE.to_string()));
        }

        match self.venue_repo.delete(venue_id).await {
            Ok(()) => {
                info!("Deleted venue: {}", venue_id);
                Ok(Deletion::Deleted)
            }
            Err(AppError::NotFound(_)) => Ok(Deletion::AlreadyAbsent),
            Err(e) if e.is_foreign_key_violation() => {
                warn!("Delete of venue {} raced with a new booking", venue_id);
                Ok(Deletion::Blocked(VENUE_DELETE_BLOCKED_MESSAGE.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn delete_event(&self, event_id: i64) -> Result<Deletion, AppError> {
        if self.event_repo.find_by_id(event_id).await?.is_none() {
            return Ok(Deletion::AlreadyAbsent);
        }
        if self.booking_repo.count_by_event(event_id).await? > 0 {
            return Ok(Deletion::Blocked(EVENT_DELETE_BLOCKED_MESSAGE.to_string()));
        }

        match self.event_repo.delete(event_id).await {
            Ok(()) => {
                info!("Deleted event: {}", event_id);
                Ok(Deletion::Deleted)
            }
            Err(AppError::NotFound(_)) => Ok(Deletion::AlreadyAbsent),
            Err(e) if e.is_foreign_key_violation() => {
                warn!("Delete of event {} raced with a new booking", event_id);
                Ok(Deletion::Blocked(EVENT_DELETE_BLOCKED_MESSAGE.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}

fn event_type_missing() -> AppError {
    AppError::Invalid(FieldErrors::single("event_type_id", EVENT_TYPE_NOT_FOUND_MESSAGE))
}
