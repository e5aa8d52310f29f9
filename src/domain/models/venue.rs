use crate::domain::validation::FieldErrors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub capacity: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated venue fields, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVenue {
    pub name: String,
    pub location: Option<String>,
    pub capacity: i32,
    pub image_url: Option<String>,
}

/// Venue fields as submitted for create or full-replace edit.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct VenueInput {
    #[validate(
        required(message = "Venue name is required"),
        length(max = 100, message = "Venue name cannot exceed 100 characters")
    )]
    pub name: Option<String>,
    #[validate(length(max = 255, message = "Location cannot exceed 255 characters"))]
    pub location: Option<String>,
    #[validate(
        required(message = "Capacity is required"),
        range(min = 0, message = "Capacity cannot be negative")
    )]
    pub capacity: Option<i32>,
    #[validate(length(max = 255, message = "Image reference cannot exceed 255 characters"))]
    pub image_url: Option<String>,
}

impl VenueInput {
    pub fn to_new_venue(&self) -> Result<NewVenue, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if self.name.is_some() && name.is_empty() && !errors.has("name") {
            errors.add("name", "Venue name is required");
        }

        errors.into_result(NewVenue {
            name: name.to_string(),
            location: blank_to_none(self.location.as_deref()),
            capacity: self.capacity.unwrap_or_default(),
            image_url: blank_to_none(self.image_url.as_deref()),
        })
    }
}

pub(crate) fn blank_to_none(raw: Option<&str>) -> Option<String> {
    crate::domain::validation::non_blank(raw).map(str::to_string)
}

impl Venue {
    /// Applies validated fields to a stored venue, keeping identity and audit columns.
    pub fn replaced_with(&self, draft: NewVenue) -> Venue {
        Venue {
            id: self.id,
            name: draft.name,
            location: draft.location,
            capacity: draft.capacity,
            image_url: draft.image_url,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: Option<&str>, capacity: Option<i32>) -> VenueInput {
        VenueInput {
            name: name.map(str::to_string),
            location: Some("12 Harbour Road".into()),
            capacity,
            image_url: None,
        }
    }

    #[test]
    fn test_valid_venue_input() {
        let venue = input(Some("  Grand Hall "), Some(50)).to_new_venue().unwrap();
        assert_eq!(venue.name, "Grand Hall");
        assert_eq!(venue.capacity, 50);
        assert_eq!(venue.location.as_deref(), Some("12 Harbour Road"));
    }

    #[test]
    fn test_missing_fields_are_reported_per_field() {
        let errors = input(None, None).to_new_venue().unwrap_err();
        assert_eq!(errors.get("name"), Some(&["Venue name is required".to_string()][..]));
        assert_eq!(errors.get("capacity"), Some(&["Capacity is required".to_string()][..]));
    }

    #[test]
    fn test_blank_name_and_long_location() {
        let mut bad = input(Some("   "), Some(-1));
        bad.location = Some("x".repeat(256));
        let errors = bad.to_new_venue().unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("location"));
        assert!(errors.has("capacity"));
    }

    #[test]
    fn test_empty_name_reads_as_missing() {
        for name in ["", "  "] {
            let errors = input(Some(name), Some(10)).to_new_venue().unwrap_err();
            assert_eq!(errors.get("name"), Some(&["Venue name is required".to_string()][..]));
        }
        let errors = input(Some("x".repeat(101).as_str()), Some(10)).to_new_venue().unwrap_err();
        assert_eq!(errors.get("name"), Some(&["Venue name cannot exceed 100 characters".to_string()][..]));
    }
}
