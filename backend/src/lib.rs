//! Quest booking backend: escape-room catalogue, reservations and
//! administration behind a session-authenticated JSON API.
//!
//! The crate follows a hexagonal layout. [`domain`] holds entities, ports
//! and services; [`inbound`] adapts HTTP onto the driving ports; and
//! [`outbound`] implements the driven ports with PostgreSQL, the local
//! filesystem and Argon2.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
