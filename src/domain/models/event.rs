use crate::domain::models::venue::blank_to_none;
use crate::domain::validation::{parse_timestamp, FieldErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub event_date: DateTime<Utc>,
    pub description: Option<String>,
    pub event_type_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub name: String,
    pub event_date: DateTime<Utc>,
    pub description: Option<String>,
    pub event_type_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EventInput {
    #[validate(
        required(message = "Event name is required"),
        length(min = 3, max = 100, message = "Event name must be 3-100 characters")
    )]
    pub name: Option<String>,
    #[validate(required(message = "Event date is required"))]
    pub event_date: Option<String>,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    #[validate(required(message = "Event type is required"))]
    pub event_type_id: Option<i64>,
}

impl EventInput {
    /// Checks every field and reduces the input to a writable event.
    ///
    /// The date must lie strictly after `now`, unless it equals `unchanged`
    /// (the stored date of an event being edited).
    pub fn to_new_event(
        &self,
        now: DateTime<Utc>,
        unchanged: Option<DateTime<Utc>>,
    ) -> Result<NewEvent, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if self.name.is_some() && name.chars().count() < 3 && !errors.has("name") {
            errors.add("name", "Event name must be 3-100 characters");
        }

        let event_date = match self.event_date.as_deref() {
            Some(raw) => match parse_timestamp(raw) {
                Some(date) if date <= now && Some(date) != unchanged => {
                    errors.add("event_date", "Event date must be in the future");
                    None
                }
                Some(date) => Some(date),
                None => {
                    errors.add("event_date", "Event date is not a valid date and time");
                    None
                }
            },
            None => None,
        };

        match (event_date, self.event_type_id) {
            (Some(event_date), Some(event_type_id)) if errors.is_empty() => Ok(NewEvent {
                name: name.to_string(),
                event_date,
                description: blank_to_none(self.description.as_deref()),
                event_type_id,
            }),
            _ => Err(errors),
        }
    }
}

impl Event {
    pub fn replaced_with(&self, draft: NewEvent) -> Event {
        Event {
            id: self.id,
            name: draft.name,
            event_date: draft.event_date,
            description: draft.description,
            event_type_id: draft.event_type_id,
            created_at: self.created_at,
        }
    }
}

/// Case folding shared by the stored `search_name` column and search patterns.
pub fn search_fold(text: &str) -> String {
    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn input(name: &str, date: DateTime<Utc>) -> EventInput {
        EventInput {
            name: Some(name.into()),
            event_date: Some(date.to_rfc3339()),
            description: None,
            event_type_id: Some(1),
        }
    }

    #[test]
    fn test_search_fold_handles_non_ascii() {
        assert_eq!(search_fold("ÉCOLE Gala"), "école gala");
        assert_eq!(search_fold("Straße FEST"), "straße fest");
    }

    #[test]
    fn test_future_event_is_accepted() {
        let now = Utc::now();
        let event = input("Tech Summit", now + Duration::days(7)).to_new_event(now, None).unwrap();
        assert_eq!(event.name, "Tech Summit");
        assert_eq!(event.event_type_id, 1);
    }

    #[test]
    fn test_past_event_is_rejected() {
        let now = Utc::now();
        let errors = input("Tech Summit", now - Duration::hours(1)).to_new_event(now, None).unwrap_err();
        assert_eq!(errors.get("event_date"), Some(&["Event date must be in the future".to_string()][..]));
    }

    #[test]
    fn test_unchanged_past_date_is_kept_on_edit() {
        let now = Utc::now();
        let stored = now - Duration::days(2);
        let event = input("Tech Summit", stored).to_new_event(now, Some(stored)).unwrap();
        assert_eq!(event.event_date, stored);
    }

    #[test]
    fn test_name_length_and_missing_type() {
        let now = Utc::now();
        let mut bad = input("ab", now + Duration::days(1));
        bad.event_type_id = None;
        bad.description = Some("d".repeat(501));
        let errors = bad.to_new_event(now, None).unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("event_type_id"));
        assert!(errors.has("description"));
    }

    #[test]
    fn test_unparseable_date() {
        let errors = EventInput {
            name: Some("Tech Summit".into()),
            event_date: Some("next friday".into()),
            description: None,
            event_type_id: Some(1),
        }
        .to_new_event(Utc::now(), None)
        .unwrap_err();
        assert!(errors.has("event_date"));
    }
}
