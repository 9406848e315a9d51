//! Driving port for authentication and session resolution.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, SessionUserError, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Resolve the user bound to a session.
    async fn current_user(&self, session_user: Option<UserId>) -> Result<User, SessionUserError>;

    /// Unknown user and wrong password fail identically.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
