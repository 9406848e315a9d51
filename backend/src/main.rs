//! Quest backend entry point: load settings, migrate, bootstrap the admin
//! account and serve the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use quest_backend::domain::{BootstrapOutcome, ensure_default_admin};
use quest_backend::inbound::http::health::HealthState;
use quest_backend::inbound::http::session_config::fingerprint::key_fingerprint;
use quest_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use quest_backend::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_migrations,
};
use quest_backend::outbound::security::Argon2PasswordHasher;
use quest_backend::settings::AppSettings;

use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let database_url = settings.database_url()?;
    let listing = settings.listing_defaults()?;

    run_migrations(database_url)
        .await
        .wrap_err("database migrations failed")?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_pool_max_size()),
    )
    .await
    .wrap_err("failed to build database pool")?;

    match settings.default_admin() {
        Some(admin) => {
            let users = DieselUserRepository::new(pool.clone());
            let outcome = ensure_default_admin(&users, &Argon2PasswordHasher, &admin)
                .await
                .map_err(|err| eyre!("default admin bootstrap failed: {err}"))?;
            if outcome == BootstrapOutcome::AlreadyPresent {
                info!(username = %admin.username, "default administrator already present");
            }
        }
        None => info!("default administrator bootstrap disabled"),
    }

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(fingerprint = %key_fingerprint(&session.key), "session key loaded");

    let config = ServerConfig::new(session, settings.bind_addr()?, pool)
        .with_listing(listing)
        .with_uploads_root(settings.uploads_root());

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?
        .await
        .wrap_err("server terminated with an error")
}
