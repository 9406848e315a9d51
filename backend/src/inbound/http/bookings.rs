//! Reservation endpoints for signed-in users.
//!
//! ```text
//! POST /api/v1/bookings  quest_id=3&date=2026-05-01&timeslot=18:00
//! GET /api/v1/bookings/mine
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::ReservationRequest;
use crate::domain::{BookingDetails, Error, ErrorCode, QuestId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_user;
use crate::inbound::http::responses::private_json;
use crate::inbound::http::schemas::{BookingForm, BookingOutcome, parse_id};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const BOOKED: &str = "Booking confirmed";

/// Reserve a slot.
///
/// A slot someone else already holds answers `409` with
/// `{success: false, message}` so the booking form can show it inline.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body(content = BookingForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Booked", body = BookingOutcome),
        (status = 400, description = "Malformed form", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Unknown quest", body = Error),
        (status = 409, description = "Slot already booked", body = BookingOutcome)
    ),
    tags = ["bookings"],
    operation_id = "createBooking",
    security(("SessionCookie" = []))
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<BookingForm>,
) -> ApiResult<HttpResponse> {
    let user = current_user(&state, &session).await?;
    let form = form.into_inner();
    let request = ReservationRequest {
        quest_id: QuestId::new(parse_id("quest_id", Some(&form.quest_id))?),
        date: form.date,
        timeslot: form.timeslot,
    };
    match state.bookings.reserve(user.id, &request).await {
        Ok(booking) => {
            Ok(HttpResponse::Created().json(BookingOutcome {
                success: true,
                message: BOOKED.to_owned(),
                booking: Some(booking),
            }))
        }
        Err(err) if err.code() == ErrorCode::SlotUnavailable => {
            Ok(HttpResponse::Conflict().json(BookingOutcome {
                success: false,
                message: err.message().to_owned(),
                booking: None,
            }))
        }
        Err(err) => Err(err),
    }
}

/// The caller's bookings, latest slot first.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/mine",
    responses(
        (status = 200, description = "Bookings", body = [BookingDetails]),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "myBookings",
    security(("SessionCookie" = []))
)]
#[get("/bookings/mine")]
pub async fn my_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = current_user(&state, &session).await?;
    let bookings = state.bookings.bookings_for_user(user.id).await?;
    Ok(private_json(&bookings))
}
