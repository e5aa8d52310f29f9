pub mod sqlite_booking_repo;
pub mod sqlite_event_repo;
pub mod sqlite_event_type_repo;
pub mod sqlite_venue_repo;

pub mod postgres_booking_repo;
pub mod postgres_event_repo;
pub mod postgres_event_type_repo;
pub mod postgres_venue_repo;
