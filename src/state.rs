use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{BookingRepository, EventRepository, EventTypeRepository, VenueRepository};
use crate::domain::services::{booking_admission::BookingService, catalog::CatalogService};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub venue_repo: Arc<dyn VenueRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub event_type_repo: Arc<dyn EventTypeRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub booking_service: Arc<BookingService>,
    pub catalog_service: Arc<CatalogService>,
}

impl AppState {
    pub fn new(
        config: Config,
        venue_repo: Arc<dyn VenueRepository>,
        event_repo: Arc<dyn EventRepository>,
        event_type_repo: Arc<dyn EventTypeRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        let booking_service = Arc::new(BookingService::new(
            venue_repo.clone(),
            event_repo.clone(),
            booking_repo.clone(),
        ));
        let catalog_service = Arc::new(CatalogService::new(
            venue_repo.clone(),
            event_repo.clone(),
            event_type_repo.clone(),
            booking_repo.clone(),
        ));

        Self {
            config,
            venue_repo,
            event_repo,
            event_type_repo,
            booking_repo,
            booking_service,
            catalog_service,
        }
    }
}
