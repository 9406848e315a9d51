//! Application settings loaded via OrthoConfig.
//!
//! Values layer as defaults, an optional config file, `QUEST_*` environment
//! variables and command-line flags.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::{DefaultAdmin, ListingDefaults, QuestSort, UnknownSortKey};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_PAGE_SIZE: u32 = 15;
const DEFAULT_UPLOADS_ROOT: &str = "static";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin";
const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

/// Settings that fail validation after loading.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("database_url is required (set QUEST_DATABASE_URL)")]
    MissingDatabaseUrl,
    #[error("invalid bind address {addr}: {source}")]
    BindAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid default_sort: {0}")]
    DefaultSort(#[from] UnknownSortKey),
    #[error("page_size must be at least 1")]
    PageSize,
}

/// Runtime configuration for the quest backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "QUEST")]
pub struct AppSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Largest number of pooled database connections.
    pub db_pool_max_size: Option<u32>,
    /// Catalogue order used when a request gives none.
    pub default_sort: Option<String>,
    /// Catalogue page size used when a request gives none.
    pub page_size: Option<u32>,
    /// Directory holding the `uploads/` folder for quest images.
    pub uploads_root: Option<PathBuf>,
    /// Create the default administrator at startup; on when unset.
    pub bootstrap_admin: Option<bool>,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub admin_email: Option<String>,
}

impl AppSettings {
    /// The configured database URL.
    ///
    /// # Errors
    /// [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Socket address built from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = self.port.unwrap_or(DEFAULT_PORT);
        let addr = if host.contains(':') {
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        };
        addr.parse()
            .map_err(|source| SettingsError::BindAddress { addr, source })
    }

    pub fn db_pool_max_size(&self) -> u32 {
        self.db_pool_max_size.unwrap_or(DEFAULT_POOL_SIZE).max(1)
    }

    /// Listing defaults for the public catalogue.
    pub fn listing_defaults(&self) -> Result<ListingDefaults, SettingsError> {
        let sort = match self.default_sort.as_deref() {
            Some(key) => key.parse::<QuestSort>()?,
            None => QuestSort::default(),
        };
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(SettingsError::PageSize);
        }
        Ok(ListingDefaults { sort, page_size })
    }

    pub fn uploads_root(&self) -> &Path {
        self.uploads_root
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_UPLOADS_ROOT))
    }

    /// Administrator credentials, or `None` when bootstrapping is disabled.
    pub fn default_admin(&self) -> Option<DefaultAdmin> {
        let enabled = self.bootstrap_admin.unwrap_or(true);
        enabled.then(|| DefaultAdmin {
            username: self
                .admin_username
                .clone()
                .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_owned()),
            password: Zeroizing::new(
                self.admin_password
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_owned()),
            ),
            email: Some(
                self.admin_email
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_owned()),
            ),
        })
    }
}
