//! PostgreSQL adapters for the driven storage ports.
//!
//! Repositories share one [`DbPool`]; schema changes ship as embedded
//! migrations applied by [`run_migrations`].

mod diesel_booking_repository;
mod diesel_error;
mod diesel_quest_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_quest_repository::DieselQuestRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
