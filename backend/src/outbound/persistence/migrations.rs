//! Embedded schema migrations, applied at startup.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failure while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    #[error("failed to apply migrations: {0}")]
    Apply(String),
    #[error("migration task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Apply every pending migration using a dedicated blocking connection.
///
/// # Errors
/// [`MigrationError`] when the database is unreachable or a migration
/// fails.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || apply_pending(&url)).await?
}

fn apply_pending(database_url: &str) -> Result<(), MigrationError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply(err.to_string()))?;
    info!(count = applied.len(), "database migrations applied");
    Ok(())
}
