//! Driven adapters: PostgreSQL persistence, password hashing, image storage
//! and report rendering.

pub mod persistence;
pub mod reports;
pub mod security;
pub mod storage;
