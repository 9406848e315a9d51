//! Driven port for account storage.

use async_trait::async_trait;

use crate::domain::{NewUser, StoredCredentials, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user repository adapters.
    pub enum UserRepositoryError {
        Connection { message: String } => "user repository connection failed: {message}",
        Query { message: String } => "user repository query failed: {message}",
        DuplicateUsername { username: String } => "username {username} already exists",
        DuplicateEmail { email: String } => "email {email} already registered",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Account plus password digest, by exact username.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError>;

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError>;

    async fn email_exists(&self, email: &str) -> Result<bool, UserRepositoryError>;

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;
}
