//! Session-user resolution for handlers.

use crate::domain::{SessionUserError, User};

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// The signed-in user, or `401`.
///
/// A session pointing at a deleted user is purged so the stale cookie is
/// not presented again.
pub async fn current_user(state: &HttpState, session: &SessionContext) -> ApiResult<User> {
    let session_user = session.user_id()?;
    match state.accounts.current_user(session_user).await {
        Ok(user) => Ok(user),
        Err(err @ SessionUserError::UserNotFound(_)) => {
            session.purge();
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

/// The signed-in user if they are an admin; `401` or `403` otherwise.
pub async fn require_admin(state: &HttpState, session: &SessionContext) -> ApiResult<User> {
    let user = current_user(state, session).await?;
    user.require_admin()?;
    Ok(user)
}
