use crate::domain::models::booking::{Booking, BookingInput, BookingProposal, NewBooking};
use crate::domain::ports::{BookingRepository, EventRepository, VenueRepository};
use crate::domain::services::Deletion;
use crate::domain::validation::FieldErrors;
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const BOOKING_CONFLICT_MESSAGE: &str = "This venue is already booked for the selected date.";
pub const BOOKING_DELETE_BLOCKED_MESSAGE: &str = "This booking is linked to other records";
pub const VENUE_NOT_FOUND_MESSAGE: &str = "Selected venue does not exist";
pub const EVENT_NOT_FOUND_MESSAGE: &str = "Selected event does not exist";

/// Why a booking proposal was not committed. All variants are user-correctable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingRejection {
    VenueNotFound(i64),
    EventNotFound(i64),
    Conflict(String),
    ValidationFailed(FieldErrors),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    Committed(Booking),
    Rejected(BookingRejection),
}

impl From<BookingRejection> for AppError {
    fn from(rejection: BookingRejection) -> Self {
        match rejection {
            BookingRejection::VenueNotFound(_) => {
                AppError::Invalid(FieldErrors::single("venue_id", VENUE_NOT_FOUND_MESSAGE))
            }
            BookingRejection::EventNotFound(_) => {
                AppError::Invalid(FieldErrors::single("event_id", EVENT_NOT_FOUND_MESSAGE))
            }
            BookingRejection::Conflict(message) => AppError::FieldConflict {
                field: "booking_date".to_string(),
                message,
            },
            BookingRejection::ValidationFailed(errors) => AppError::Invalid(errors),
        }
    }
}

/// Admits bookings while keeping each venue to one booking per calendar day.
///
/// The pre-check only produces the friendly conflict; the unique index on
/// `(venue_id, booking_date)` decides races, and its violation is reported
/// as the same conflict.
pub struct BookingService {
    venue_repo: Arc<dyn VenueRepository>,
    event_repo: Arc<dyn EventRepository>,
    booking_repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(
        venue_repo: Arc<dyn VenueRepository>,
        event_repo: Arc<dyn EventRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        Self { venue_repo, event_repo, booking_repo }
    }

    /// Validates and commits a booking. With `excluding_booking_id` the
    /// identified booking is rewritten in place and never conflicts with itself.
    #[instrument(skip(self, input), fields(venue_id = ?input.venue_id, event_id = ?input.event_id))]
    pub async fn propose_booking(
        &self,
        input: &BookingInput,
        excluding_booking_id: Option<i64>,
    ) -> Result<Admission, AppError> {
        let proposal = match input.to_proposal() {
            Ok(p) => p,
            Err(errors) => return Ok(Admission::Rejected(BookingRejection::ValidationFailed(errors))),
        };

        if let Some(rejection) = self.check_references(&proposal).await? {
            return Ok(Admission::Rejected(rejection));
        }

        let taken = self.booking_repo
            .count_for_venue_on(proposal.venue_id, proposal.booking_date, excluding_booking_id)
            .await?;
        if taken > 0 {
            info!("Booking rejected: venue {} already booked on {}", proposal.venue_id, proposal.booking_date);
            return Ok(Admission::Rejected(BookingRejection::Conflict(BOOKING_CONFLICT_MESSAGE.to_string())));
        }

        let written = match excluding_booking_id {
            Some(id) => {
                let existing = self.booking_repo.find_by_id(id).await?
                    .ok_or(AppError::NotFound("Booking not found".into()))?;
                let updated = Booking {
                    event_id: proposal.event_id,
                    venue_id: proposal.venue_id,
                    booking_date: proposal.booking_date,
                    ..existing
                };
                self.booking_repo.update(&updated).await
            }
            None => self.booking_repo.create(&NewBooking::new(&proposal)).await,
        };

        match written {
            Ok(booking) => {
                info!("Booking committed: {} (venue {} on {})", booking.id, booking.venue_id, booking.booking_date);
                Ok(Admission::Committed(booking))
            }
            Err(e) if e.is_unique_violation() => {
                warn!(
                    "Booking lost race for venue {} on {}; reporting conflict",
                    proposal.venue_id, proposal.booking_date
                );
                Ok(Admission::Rejected(BookingRejection::Conflict(BOOKING_CONFLICT_MESSAGE.to_string())))
            }
            Err(e) if e.is_foreign_key_violation() => {
                warn!("Booking references vanished before commit: {:?}", proposal);
                let rejection = self.check_references(&proposal).await?
                    .unwrap_or(BookingRejection::EventNotFound(proposal.event_id));
                Ok(Admission::Rejected(rejection))
            }
            Err(e) => Err(e),
        }
    }

    async fn check_references(&self, proposal: &BookingProposal) -> Result<Option<BookingRejection>, AppError> {
        if self.venue_repo.find_by_id(proposal.venue_id).await?.is_none() {
            return Ok(Some(BookingRejection::VenueNotFound(proposal.venue_id)));
        }
        if self.event_repo.find_by_id(proposal.event_id).await?.is_none() {
            return Ok(Some(BookingRejection::EventNotFound(proposal.event_id)));
        }
        Ok(None)
    }

    /// Removes a booking. Deleting an unknown id succeeds without change.
    pub async fn delete_booking(&self, booking_id: i64) -> Result<Deletion, AppError> {
        match self.booking_repo.delete(booking_id).await {
            Ok(()) => {
                info!("Deleted booking: {}", booking_id);
                Ok(Deletion::Deleted)
            }
            Err(AppError::NotFound(_)) => Ok(Deletion::AlreadyAbsent),
            Err(e) if e.is_foreign_key_violation() => {
                warn!("Delete of booking {} blocked by referencing rows", booking_id);
                Ok(Deletion::Blocked(BOOKING_DELETE_BLOCKED_MESSAGE.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}
