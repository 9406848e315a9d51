//! Account endpoints.
//!
//! ```text
//! POST /api/v1/register {"username":"alice","email":"alice@example.com","password":"s3cret"}
//! POST /api/v1/login {"username":"alice","password":"s3cret"}
//! POST /api/v1/logout
//! GET /api/v1/me
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Error, LoginCredentials, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_user;
use crate::inbound::http::responses::private_json;
use crate::inbound::http::schemas::{LoginRequest, RegisterRequest};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Validation failed; `details.code` names the rule", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let registration = Registration::new(&body.username, body.email.as_deref(), &body.password);
    let user = state.accounts.register(&registration).await?;
    session.persist_user(user.id)?;
    Ok(HttpResponse::Created().json(user))
}

/// Verify credentials and bind the user to a fresh session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank username or password", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)?;
    let user = state.accounts.login(&credentials).await?;
    session.persist_user(user.id)?;
    Ok(web::Json(user))
}

#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// The signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["users"],
    operation_id = "me",
    security(("SessionCookie" = []))
)]
#[get("/me")]
pub async fn me(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let user = current_user(&state, &session).await?;
    Ok(private_json(&user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SessionUserError, UserId};
    use crate::inbound::http::test_utils::{MockPorts, api_service, session_cookie};
    use crate::test_support;
    use actix_web::{http::StatusCode, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[actix_web::test]
    async fn register_signs_the_new_user_in() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_register()
            .withf(|reg| reg.username() == "alice" && reg.email().is_none())
            .return_once(|_| Ok(test_support::user(5, "alice", false)));
        ports
            .accounts
            .expect_current_user()
            .withf(|id| *id == Some(UserId::new(5)))
            .return_once(|_| Ok(test_support::user(5, "alice", false)));
        let app = api_service(ports).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({ "username": " alice ", "email": "  ", "password": "s3cret" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let cookie = session_cookie(&res);

        let me_req = test::TestRequest::get().uri("/api/v1/me").cookie(cookie).to_request();
        let body: Value = test::call_and_read_body_json(&app, me_req).await;
        assert_eq!(body["username"], json!("alice"));
        assert_eq!(body["isAdmin"], json!(false));
    }

    #[rstest]
    #[actix_web::test]
    async fn registration_failures_keep_their_code() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_register()
            .return_once(|_| Err(Error::validation("username_taken", "username already exists")));
        let app = api_service(ports).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({ "username": "alice", "password": "s3cret" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], json!("username_taken"));
    }

    #[rstest]
    #[case("", "pw")]
    #[case("alice", "")]
    #[actix_web::test]
    async fn login_rejects_blank_fields(#[case] username: &str, #[case] password: &str) {
        let app = api_service(MockPorts::default()).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": password }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn wrong_password_is_unauthorized() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_login()
            .return_once(|_| Err(Error::unauthorized("invalid credentials")));
        let app = api_service(ports).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": "alice", "password": "nope" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().all(|c| c.name() != "session"));
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_forgets_the_user() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_login()
            .return_once(|_| Ok(test_support::user(5, "alice", false)));
        ports
            .accounts
            .expect_current_user()
            .withf(|id| id.is_none())
            .return_once(|_| Err(SessionUserError::Unauthenticated));
        let app = api_service(ports).await;

        let login_req = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": "alice", "password": "s3cret" }))
            .to_request();
        let cookie = session_cookie(&test::call_service(&app, login_req).await);

        let logout_req = test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, logout_req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let cleared = session_cookie(&res);
        assert_eq!(cleared.value(), "");

        let me_req = test::TestRequest::get().uri("/api/v1/me").to_request();
        let res = test::call_service(&app, me_req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], json!("unauthenticated"));
    }
}
