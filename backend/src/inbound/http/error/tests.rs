//! Status mapping and redaction of the error envelope.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_of(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = error.error_response();
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body()).await.expect("read body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, header, value)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("admins only"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::slot_unavailable("taken"), StatusCode::CONFLICT)]
#[case(Error::has_active_bookings(2), StatusCode::CONFLICT)]
#[case(Error::conflict("race"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_follows_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(error.status_code(), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id() {
    let error = Error::internal("connection string leaked")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "secret": "x" }));
    let (status, header, body) = body_of(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({ "code": "internal_error", "message": "Internal server error", "traceId": TRACE_ID })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::has_active_bookings(3).with_trace_id(TRACE_ID);
    let (status, _, body) = body_of(&error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!("has_active_bookings"));
    assert_eq!(body["details"]["bookingCount"], json!(3));
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_header() {
    let (_, header, body) = body_of(&Error::not_found("quest 9 not found")).await;
    assert!(header.is_none());
    assert!(body.get("traceId").is_none());
}
