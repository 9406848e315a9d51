//! Typed access to the cookie session.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Session wrapper exposing only the operations handlers need.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind `user_id` under a fresh session id.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|err| Error::internal(format!("failed to persist session: {err}")))
    }

    /// The bound user id. A value that does not decode is treated as
    /// absent.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        match self.0.get::<i64>(USER_ID_KEY) {
            Ok(id) => Ok(id.map(UserId::new)),
            Err(err) => {
                warn!(error = %err, "discarding undecodable session user id");
                self.0.remove(USER_ID_KEY);
                Ok(None)
            }
        }
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}
