//! Shared helpers for backend integration tests.
//!
//! Every file under `backend/tests/` compiles as its own crate, so each one
//! pulls in this module and uses only part of it.
#![allow(dead_code, reason = "not every test crate uses every helper")]

pub mod cluster_skip;
pub mod pg_embed;
pub mod test_database;

pub use cluster_skip::handle_cluster_setup_failure;
pub use test_database::TestDatabase;

/// Render a `postgres` error with its SQLSTATE and server message.
///
/// `Display` on `postgres::Error` collapses server errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}
