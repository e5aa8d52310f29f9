pub mod booking;
pub mod event;
pub mod event_type;
pub mod health;
pub mod venue;
