//! Everything the HTTP server needs once startup checks have passed.

use std::net::SocketAddr;
use std::path::PathBuf;

use quest_backend::domain::ListingDefaults;
use quest_backend::inbound::http::session_config::SessionSettings;
use quest_backend::outbound::persistence::DbPool;

pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) listing: ListingDefaults,
    pub(crate) uploads_root: PathBuf,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            session,
            bind_addr,
            db_pool,
            listing: ListingDefaults::default(),
            uploads_root: PathBuf::from("static"),
        }
    }

    #[must_use]
    pub fn with_listing(mut self, listing: ListingDefaults) -> Self {
        self.listing = listing;
        self
    }

    /// Directory whose `uploads/` subfolder stores quest images.
    #[must_use]
    pub fn with_uploads_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.uploads_root = root.into();
        self
    }
}
