//! Driven port for password digests.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    pub enum PasswordHashError {
        Hash { message: String } => "password hashing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Digest `plain` into a self-describing string.
    async fn hash(&self, plain: &str) -> Result<String, PasswordHashError>;

    /// Whether `plain` matches `digest`. Malformed digests never match.
    async fn verify(&self, plain: &str, digest: &str) -> Result<bool, PasswordHashError>;
}
