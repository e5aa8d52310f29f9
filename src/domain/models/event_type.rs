use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Fixed category label for events, seeded by the initial migration.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, Eq)]
pub struct EventType {
    pub id: i64,
    pub name: String,
}

pub const SEEDED_EVENT_TYPES: [(i64, &str); 5] = [
    (1, "Conference"),
    (2, "Wedding"),
    (3, "Concert"),
    (4, "Seminar"),
    (5, "Party"),
];
