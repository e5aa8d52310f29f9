use crate::domain::models::event::search_fold;
use crate::domain::validation::{parse_calendar_date, FieldErrors};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A venue reserved for an event on one calendar day.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Booking {
    pub id: i64,
    pub event_id: i64,
    pub venue_id: i64,
    pub booking_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub event_id: i64,
    pub venue_id: i64,
    pub booking_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl NewBooking {
    pub fn new(proposal: &BookingProposal) -> Self {
        Self {
            event_id: proposal.event_id,
            venue_id: proposal.venue_id,
            booking_date: proposal.booking_date,
            created_at: Utc::now(),
        }
    }
}

/// Booking joined with the event, its type, and the venue.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct BookingDetails {
    pub id: i64,
    pub event_id: i64,
    pub venue_id: i64,
    pub booking_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub event_type_id: i64,
    pub event_type_name: String,
    pub venue_name: String,
    pub venue_location: Option<String>,
}

/// Booking fields as submitted for create or edit.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookingInput {
    #[validate(required(message = "Event is required"))]
    pub event_id: Option<i64>,
    #[validate(required(message = "Venue is required"))]
    pub venue_id: Option<i64>,
    #[validate(required(message = "Booking date is required"))]
    pub booking_date: Option<String>,
}

/// A fully-typed booking request: both references present, date normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingProposal {
    pub event_id: i64,
    pub venue_id: i64,
    pub booking_date: NaiveDate,
}

impl BookingInput {
    pub fn new(event_id: i64, venue_id: i64, booking_date: impl Into<String>) -> Self {
        Self {
            event_id: Some(event_id),
            venue_id: Some(venue_id),
            booking_date: Some(booking_date.into()),
        }
    }

    pub fn to_proposal(&self) -> Result<BookingProposal, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        let booking_date = self.booking_date.as_deref().and_then(|raw| {
            let parsed = parse_calendar_date(raw);
            if parsed.is_none() {
                errors.add("booking_date", "Booking date is not a valid date");
            }
            parsed
        });

        match (self.event_id, self.venue_id, booking_date) {
            (Some(event_id), Some(venue_id), Some(booking_date)) if errors.is_empty() => {
                Ok(BookingProposal { event_id, venue_id, booking_date })
            }
            _ => Err(errors),
        }
    }
}

/// Optional listing criteria, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    /// Matches the booking id's decimal form or the event name, case-insensitively.
    pub search: Option<String>,
    pub event_type_id: Option<i64>,
    pub venue_id: Option<i64>,
    /// Inclusive.
    pub start_date: Option<NaiveDate>,
    /// Inclusive.
    pub end_date: Option<NaiveDate>,
    /// Accepted from the listing surface; has no effect on the result.
    pub available_only: bool,
}

impl BookingFilter {
    /// Folded `LIKE` pattern for the search text, or `None` when there is no search.
    /// Used with `ESCAPE '\'`.
    pub fn search_pattern(&self) -> Option<String> {
        let needle = self.search.as_deref().filter(|s| !s.is_empty())?;
        Some(format!("%{}%", escape_like(&search_fold(needle))))
    }
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposal_normalises_date() {
        let proposal = BookingInput::new(3, 7, "2025-06-01T18:30:00").to_proposal().unwrap();
        assert_eq!(proposal.event_id, 3);
        assert_eq!(proposal.venue_id, 7);
        assert_eq!(proposal.booking_date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn test_missing_references_are_field_errors() {
        let errors = BookingInput::default().to_proposal().unwrap_err();
        assert!(errors.has("event_id"));
        assert!(errors.has("venue_id"));
        assert!(errors.has("booking_date"));
    }

    #[test]
    fn test_bad_date_is_field_error() {
        let errors = BookingInput::new(1, 1, "01/06/2025").to_proposal().unwrap_err();
        assert_eq!(errors.get("booking_date"), Some(&["Booking date is not a valid date".to_string()][..]));
        assert!(!errors.has("event_id"));
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        let filter = BookingFilter { search: Some("100%_Off\\".into()), ..Default::default() };
        assert_eq!(filter.search_pattern().as_deref(), Some("%100\\%\\_off\\\\%"));

        let empty = BookingFilter { search: Some(String::new()), ..Default::default() };
        assert_eq!(empty.search_pattern(), None);
        assert_eq!(BookingFilter::default().search_pattern(), None);
    }
}
