use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Per-field validation messages, keyed by the request field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, list) in errors.field_errors() {
            for err in list {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid ({})", field, err.code));
                out.add(&field, message);
            }
        }
        out
    }
}

/// Reduces a date or timestamp string to its calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the date as written, in the
/// timestamp's own offset) and naive `YYYY-MM-DDTHH:MM[:SS]` values.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    parse_naive_datetime(raw).map(|dt| dt.date())
}

/// Parses an event timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    parse_naive_datetime(raw).map(|dt| dt.and_utc())
}

fn parse_naive_datetime(raw: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Treats blank form values as absent.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_calendar_date_discards_time_of_day() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(parse_calendar_date("2025-06-01"), Some(expected));
        assert_eq!(parse_calendar_date("2025-06-01T23:59:00"), Some(expected));
        assert_eq!(parse_calendar_date("2025-06-01T08:30:00+02:00"), Some(expected));
        assert_eq!(parse_calendar_date(" 2025-06-01 10:00 "), Some(expected));
    }

    #[test]
    fn test_calendar_date_rejects_garbage() {
        assert_eq!(parse_calendar_date("tomorrow"), None);
        assert_eq!(parse_calendar_date("2025-13-01"), None);
        assert_eq!(parse_calendar_date(""), None);
    }

    #[test]
    fn test_timestamp_without_offset_is_utc() {
        let parsed = parse_timestamp("2030-01-02T10:15").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 1, 2, 10, 15, 0).unwrap());

        let shifted = parse_timestamp("2030-01-02T10:15:00+01:00").unwrap();
        assert_eq!(shifted.hour(), 9);
    }

    #[test]
    fn test_field_errors_collect_per_field() {
        let mut errors = FieldErrors::new();
        assert!(errors.clone().into_result(()).is_ok());

        errors.add("name", "Name is required");
        errors.add("name", "Name is too long");
        errors.add("capacity", "Capacity is required");

        assert_eq!(errors.get("name").map(<[String]>::len), Some(2));
        assert!(errors.has("capacity"));
        assert!(!errors.has("location"));

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["capacity"][0], "Capacity is required");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some(" 7 ")), Some("7"));
        assert_eq!(non_blank(None), None);
    }
}
