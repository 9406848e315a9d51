//! Startup creation of the default administrator.

use tracing::{info, warn};
use zeroize::Zeroizing;

use super::ports::{PasswordHasher, UserRepository, UserRepositoryError};
use super::{EmailAddress, Error, NewUser, Username, port_errors};

/// Credentials of the reserved administrator account.
#[derive(Debug, Clone)]
pub struct DefaultAdmin {
    pub username: String,
    pub password: Zeroizing<String>,
    pub email: Option<String>,
}

/// What the bootstrap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    AlreadyPresent,
}

/// Create the administrator unless a user with its name exists.
///
/// Safe to run on every start and from several processes at once: losing
/// the insert race counts as [`BootstrapOutcome::AlreadyPresent`].
pub async fn ensure_default_admin<U, H>(
    users: &U,
    hasher: &H,
    admin: &DefaultAdmin,
) -> Result<BootstrapOutcome, Error>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    let username = Username::new(&admin.username)?;
    if users
        .username_exists(username.as_ref())
        .await
        .map_err(port_errors::user_store)?
    {
        return Ok(BootstrapOutcome::AlreadyPresent);
    }
    let email = admin.email.as_deref().map(EmailAddress::new).transpose()?;
    let password_hash = hasher
        .hash(&admin.password)
        .await
        .map_err(port_errors::password_hasher)?;

    match users
        .insert(&NewUser {
            username,
            email,
            password_hash,
            is_admin: true,
        })
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "default administrator created");
            warn!(
                username = %user.username,
                "default administrator uses the configured bootstrap password; change it"
            );
            Ok(BootstrapOutcome::Created)
        }
        Err(UserRepositoryError::DuplicateUsername { .. }) => Ok(BootstrapOutcome::AlreadyPresent),
        Err(err) => Err(port_errors::user_store(err)),
    }
}
