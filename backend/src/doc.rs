//! OpenAPI document for the quest booking API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::QuestDetail;
use crate::domain::{
    Booking, BookingDetails, Error, ErrorCode, Quest, QuestBookingSummary, QuestSort,
    ReportFormat, User,
};
use crate::inbound::http::schemas::{
    BookingForm, BookingOutcome, DeletedBookings, ImagePayload, LoginRequest, QuestDraftRequest,
    QuestPageSchema, ReceiptBody, RegisterRequest, StatementBody,
};

/// Registers the `session` cookie scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /api/v1/login or /api/v1/register.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Quest booking API",
        description = "Escape-room catalogue, reservations, and administration."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::quests::list_quests,
        crate::inbound::http::quests::get_quest,
        crate::inbound::http::quests::booked_slots,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::me,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::my_bookings,
        crate::inbound::http::documents::statement,
        crate::inbound::http::documents::receipt,
        crate::inbound::http::admin::list_quests,
        crate::inbound::http::admin::create_quest,
        crate::inbound::http::admin::update_quest,
        crate::inbound::http::admin::delete_quest,
        crate::inbound::http::admin::delete_quest_cascade,
        crate::inbound::http::admin::delete_quest_bookings,
        crate::inbound::http::admin::quest_has_bookings,
        crate::inbound::http::admin::list_bookings,
        crate::inbound::http::admin::cancel_booking,
        crate::inbound::http::reports::export_bookings,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Quest,
        QuestDetail,
        QuestPageSchema,
        QuestSort,
        User,
        Booking,
        BookingDetails,
        QuestBookingSummary,
        ReportFormat,
        QuestDraftRequest,
        ImagePayload,
        LoginRequest,
        RegisterRequest,
        BookingForm,
        BookingOutcome,
        StatementBody,
        ReceiptBody,
        DeletedBookings,
    )),
    tags(
        (name = "quests", description = "Public catalogue"),
        (name = "users", description = "Registration and sessions"),
        (name = "bookings", description = "Reservations by signed-in users"),
        (name = "documents", description = "Printable customer documents"),
        (name = "admin", description = "Quest and booking administration"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
