pub mod booking;
pub mod event;
pub mod event_type;
pub mod venue;
