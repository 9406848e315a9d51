//! Helpers shared by handler tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::{Error, ListingDefaults, UserId};
use crate::domain::ports::{
    MockAccounts, MockBookingDesk, MockBookingReports, MockCustomerDocuments,
    MockQuestAdministration, MockQuestCatalogue,
};

use super::configure_api;
use super::session::SessionContext;
use super::session_config::SESSION_COOKIE_NAME;
use super::state::HttpState;

const SIGN_IN_PATH: &str = "/__test/sign-in";

/// Cookie sessions with a throwaway key and no `Secure` flag.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("response sets the session cookie")
}

/// One mock per driving port; configure expectations then call
/// [`MockPorts::into_state`].
#[derive(Default)]
pub struct MockPorts {
    pub catalogue: MockQuestCatalogue,
    pub bookings: MockBookingDesk,
    pub admin: MockQuestAdministration,
    pub accounts: MockAccounts,
    pub reports: MockBookingReports,
    pub documents: MockCustomerDocuments,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            catalogue: Arc::new(self.catalogue),
            bookings: Arc::new(self.bookings),
            admin: Arc::new(self.admin),
            accounts: Arc::new(self.accounts),
            reports: Arc::new(self.reports),
            documents: Arc::new(self.documents),
            listing: ListingDefaults::default(),
        }
    }
}

async fn sign_in(session: SessionContext, id: web::Path<i64>) -> Result<HttpResponse, Error> {
    session.persist_user(UserId::new(id.into_inner()))?;
    Ok(HttpResponse::NoContent().finish())
}

/// The full API over mocked ports, plus a route that binds a session to a
/// user id without going through `login`.
pub async fn api_service(
    ports: MockPorts,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .wrap(test_session_middleware())
            .route(&format!("{SIGN_IN_PATH}/{{id}}"), web::post().to(sign_in))
            .configure(configure_api),
    )
    .await
}

/// Session cookie for `user_id`, minted through [`api_service`].
pub async fn signed_in<S>(app: &S, user_id: i64) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri(&format!("{SIGN_IN_PATH}/{user_id}"))
        .to_request();
    session_cookie(&test::call_service(app, req).await)
}
