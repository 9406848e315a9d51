//! Wire adapters into services and services into [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use quest_backend::domain::ports::ReportRenderer;
use quest_backend::domain::{
    AccountService, BookingService, DocumentService, QuestCatalogueService, QuestLifecycleService,
    ReportService,
};
use quest_backend::inbound::http::state::HttpState;
use quest_backend::outbound::persistence::{
    DieselBookingRepository, DieselQuestRepository, DieselUserRepository,
};
use quest_backend::outbound::reports::{CsvReportRenderer, JsonReportRenderer};
use quest_backend::outbound::security::Argon2PasswordHasher;
use quest_backend::outbound::storage::CapStdImageStore;

use super::ServerConfig;

/// Build the shared HTTP state from the pool and uploads directory.
///
/// # Errors
/// Propagates [`std::io::Error`] when the uploads directory cannot be
/// created or opened.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let quests = Arc::new(DieselQuestRepository::new(config.db_pool.clone()));
    let bookings = Arc::new(DieselBookingRepository::new(config.db_pool.clone()));
    let users = Arc::new(DieselUserRepository::new(config.db_pool.clone()));
    let images = Arc::new(CapStdImageStore::open(&config.uploads_root)?);
    let renderers: Vec<Arc<dyn ReportRenderer>> =
        vec![Arc::new(CsvReportRenderer), Arc::new(JsonReportRenderer)];

    Ok(HttpState {
        catalogue: Arc::new(QuestCatalogueService::new(
            quests.clone(),
            bookings.clone(),
            clock.clone(),
        )),
        bookings: Arc::new(BookingService::new(quests.clone(), bookings.clone())),
        admin: Arc::new(QuestLifecycleService::new(
            quests,
            bookings.clone(),
            images,
        )),
        accounts: Arc::new(AccountService::new(users, Arc::new(Argon2PasswordHasher))),
        reports: Arc::new(ReportService::new(bookings, renderers, clock.clone())),
        documents: Arc::new(DocumentService::new(clock)),
        listing: config.listing,
    })
}
