//! Registration, login and session resolution implementing [`Accounts`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::ports::{Accounts, PasswordHasher, UserRepository};
use super::{
    Error, LoginCredentials, NewUser, Registration, RegistrationError, SessionUserError, User,
    UserId, port_errors,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> Accounts for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn current_user(&self, session_user: Option<UserId>) -> Result<User, SessionUserError> {
        let id = session_user.ok_or(SessionUserError::Unauthenticated)?;
        self.users
            .find_by_id(id)
            .await
            .map_err(|err| SessionUserError::Backend(port_errors::user_store(err)))?
            .ok_or(SessionUserError::UserNotFound(id))
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(stored) = self
            .users
            .find_credentials(credentials.username())
            .await
            .map_err(port_errors::user_store)?
        else {
            debug!(username = credentials.username(), "login for unknown user");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(port_errors::password_hasher)?;
        if !matches {
            debug!(user_id = %stored.user.id, "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        info!(user_id = %stored.user.id, "user logged in");
        Ok(stored.user)
    }

    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        if self
            .users
            .username_exists(registration.username())
            .await
            .map_err(port_errors::user_store)?
        {
            return Err(RegistrationError::UsernameTaken.into());
        }
        if let Some(email) = registration.email() {
            if self
                .users
                .email_exists(email)
                .await
                .map_err(port_errors::user_store)?
            {
                return Err(RegistrationError::EmailTaken.into());
            }
        }
        let valid = registration.validate()?;

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(port_errors::password_hasher)?;
        let user = self
            .users
            .insert(&NewUser {
                username: valid.username,
                email: valid.email,
                password_hash,
                is_admin: false,
            })
            .await
            .map_err(port_errors::user_store)?;
        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }
}
