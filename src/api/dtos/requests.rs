use crate::domain::models::booking::BookingFilter;
use crate::domain::validation::{non_blank, parse_calendar_date, FieldErrors};
use serde::Deserialize;

/// Raw listing parameters. Values stay strings so blank form fields read as absent.
#[derive(Deserialize, Default, Debug)]
pub struct BookingListQuery {
    pub search: Option<String>,
    pub event_type_id: Option<String>,
    pub venue_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub available_only: Option<String>,
}

impl BookingListQuery {
    pub fn into_filter(self) -> Result<BookingFilter, FieldErrors> {
        let mut errors = FieldErrors::new();

        let mut id = |field: &str, raw: Option<&str>| -> Option<i64> {
            let raw = non_blank(raw)?;
            raw.parse().map_err(|_| errors.add(field, format!("{} must be a number", field))).ok()
        };
        let event_type_id = id("event_type_id", self.event_type_id.as_deref());
        let venue_id = id("venue_id", self.venue_id.as_deref());

        let mut date = |field: &str, raw: Option<&str>| {
            let raw = non_blank(raw)?;
            let parsed = parse_calendar_date(raw);
            if parsed.is_none() {
                errors.add(field, format!("{} must be a date (YYYY-MM-DD)", field));
            }
            parsed
        };
        let start_date = date("start_date", self.start_date.as_deref());
        let end_date = date("end_date", self.end_date.as_deref());

        let available_only = matches!(
            non_blank(self.available_only.as_deref()),
            Some("true" | "on" | "1")
        );

        errors.into_result(BookingFilter {
            search: self.search.filter(|s| !s.is_empty()),
            event_type_id,
            venue_id,
            start_date,
            end_date,
            available_only,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_blank_values_are_absent() {
        let filter = BookingListQuery {
            search: Some(String::new()),
            event_type_id: Some(String::new()),
            venue_id: Some("  ".into()),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter, BookingFilter::default());
    }

    #[test]
    fn test_full_query() {
        let filter = BookingListQuery {
            search: Some("Gala".into()),
            event_type_id: Some("2".into()),
            venue_id: Some("4".into()),
            start_date: Some("2025-01-01".into()),
            end_date: Some("2025-12-31".into()),
            available_only: Some("true".into()),
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.event_type_id, Some(2));
        assert_eq!(filter.venue_id, Some(4));
        assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(filter.end_date, NaiveDate::from_ymd_opt(2025, 12, 31));
        assert!(filter.available_only);
    }

    #[test]
    fn test_malformed_values_are_field_errors() {
        let errors = BookingListQuery {
            venue_id: Some("main-hall".into()),
            start_date: Some("01/01/2025".into()),
            ..Default::default()
        }
        .into_filter()
        .unwrap_err();
        assert!(errors.has("venue_id"));
        assert!(errors.has("start_date"));
        assert!(!errors.has("end_date"));
    }
}
