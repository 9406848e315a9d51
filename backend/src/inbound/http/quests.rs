//! Public catalogue endpoints.
//!
//! ```text
//! GET /api/v1/quests?genre=horror,mystic&sort=price_low
//! GET /api/v1/quests/3
//! GET /api/v1/available-slots?quest_id=3&date=2026-05-01
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::ports::QuestDetail;
use crate::domain::{Error, QuestId, QuestListQuery, RawQuestQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AvailableSlotsQuery, QuestListParams, QuestPageSchema, parse_id};
use crate::inbound::http::state::HttpState;

/// Page through quests matching the optional filters.
#[utoipa::path(
    get,
    path = "/api/v1/quests",
    params(QuestListParams),
    responses(
        (status = 200, description = "Matching quests", body = QuestPageSchema),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["quests"],
    operation_id = "listQuests",
    security([])
)]
#[get("/quests")]
pub async fn list_quests(
    state: web::Data<HttpState>,
    params: web::Query<QuestListParams>,
) -> ApiResult<HttpResponse> {
    let raw = RawQuestQuery::from(params.into_inner());
    let query = QuestListQuery::parse(&raw, state.listing);
    let page = state.catalogue.list_quests(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// One quest with the times already booked today.
#[utoipa::path(
    get,
    path = "/api/v1/quests/{id}",
    params(("id" = i64, Path, description = "Quest id")),
    responses(
        (status = 200, description = "Quest", body = QuestDetail),
        (status = 404, description = "Unknown quest", body = Error)
    ),
    tags = ["quests"],
    operation_id = "getQuest",
    security([])
)]
#[get("/quests/{id}")]
pub async fn get_quest(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<web::Json<QuestDetail>> {
    let detail = state
        .catalogue
        .quest_detail(QuestId::new(id.into_inner()))
        .await?;
    Ok(web::Json(detail))
}

/// Times already taken for a quest on a date.
///
/// Despite the path name this lists booked slots; clients subtract them
/// from the opening hours.
#[utoipa::path(
    get,
    path = "/api/v1/available-slots",
    params(AvailableSlotsQuery),
    responses(
        (status = 200, description = "Booked `HH:MM` labels, ascending", body = [String]),
        (status = 400, description = "Missing or malformed parameters", body = Error)
    ),
    tags = ["quests"],
    operation_id = "bookedSlots",
    security([])
)]
#[get("/available-slots")]
pub async fn booked_slots(
    state: web::Data<HttpState>,
    query: web::Query<AvailableSlotsQuery>,
) -> ApiResult<web::Json<Vec<String>>> {
    let query = query.into_inner();
    let quest_id = QuestId::new(parse_id("quest_id", query.quest_id.as_deref())?);
    let date = query.date.unwrap_or_default();
    let slots = state
        .bookings
        .slots_booked_for_quest_on_date(quest_id, date.trim())
        .await?;
    Ok(web::Json(slots))
}
