//! HTTP inbound adapter exposing the JSON API.

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod documents;
pub mod error;
pub mod health;
pub mod quests;
pub mod reports;
pub mod responses;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;
use serde_json::json;

use crate::domain::Error;

pub use error::ApiResult;

/// JSON bodies carry base64 images of up to 5 MiB.
const JSON_LIMIT_BYTES: usize = 8 * 1024 * 1024;

fn rejected(kind: &str, err: &dyn std::fmt::Display) -> actix_web::Error {
    Error::invalid_request(format!("malformed {kind}: {err}"))
        .with_details(json!({ "location": kind }))
        .into()
}

/// Register every `/api/v1` route plus extractor error handlers that answer
/// with the standard error body.
///
/// The caller wraps the app in the session middleware and provides
/// `web::Data<HttpState>`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(
                web::JsonConfig::default()
                    .limit(JSON_LIMIT_BYTES)
                    .error_handler(|err, _| rejected("body", &err)),
            )
            .app_data(web::QueryConfig::default().error_handler(|err, _| rejected("query", &err)))
            .app_data(web::FormConfig::default().error_handler(|err, _| rejected("form", &err)))
            .app_data(web::PathConfig::default().error_handler(|err, _| rejected("path", &err)))
            .service(quests::list_quests)
            .service(quests::get_quest)
            .service(quests::booked_slots)
            .service(users::register)
            .service(users::login)
            .service(users::logout)
            .service(users::me)
            .service(bookings::create_booking)
            .service(bookings::my_bookings)
            .service(documents::statement)
            .service(documents::receipt)
            .service(admin::list_quests)
            .service(admin::create_quest)
            .service(admin::update_quest)
            .service(admin::delete_quest)
            .service(admin::delete_quest_cascade)
            .service(admin::delete_quest_bookings)
            .service(admin::quest_has_bookings)
            .service(admin::list_bookings)
            .service(admin::cancel_booking)
            .service(reports::export_bookings),
    );
}

#[cfg(test)]
mod tests {
    use super::test_utils::{MockPorts, api_service, signed_in};
    use crate::test_support;
    use actix_web::{http::StatusCode, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[actix_web::test]
    async fn malformed_json_uses_the_error_body() {
        let app = api_service(MockPorts::default()).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/login")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], json!("invalid_request"));
        assert_eq!(body["details"]["location"], json!("body"));
    }

    #[rstest]
    #[actix_web::test]
    async fn non_numeric_path_id_is_a_bad_request() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_current_user()
            .returning(|_| Ok(test_support::user(1, "admin", true)));
        let app = api_service(ports).await;
        let cookie = signed_in(&app, 1).await;

        let req = test::TestRequest::delete()
            .uri("/api/v1/admin/quests/abc")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
