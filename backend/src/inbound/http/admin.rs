//! Admin endpoints for quests and bookings.
//!
//! Every handler first resolves the session to an admin user.
//!
//! ```text
//! GET    /api/v1/admin/quests
//! POST   /api/v1/admin/quests
//! PUT    /api/v1/admin/quests/{id}
//! DELETE /api/v1/admin/quests/{id}
//! DELETE /api/v1/admin/quests/{id}/cascade
//! DELETE /api/v1/admin/quests/{id}/bookings
//! GET    /api/v1/admin/quests/{id}/has-bookings
//! GET    /api/v1/admin/bookings?quest_id=3
//! DELETE /api/v1/admin/bookings/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{
    BookingDetails, BookingId, Error, Quest, QuestBookingSummary, QuestId, QuestListQuery,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::responses::private_json;
use crate::inbound::http::schemas::{
    AdminBookingsQuery, DeletedBookings, QuestDraftRequest, parse_id,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Every quest in the default order.
#[utoipa::path(
    get,
    path = "/api/v1/admin/quests",
    responses(
        (status = 200, description = "Quests", body = [Quest]),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not an admin", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListQuests",
    security(("SessionCookie" = []))
)]
#[get("/admin/quests")]
pub async fn list_quests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let page = state
        .catalogue
        .list_quests(&QuestListQuery::everything(state.listing))
        .await?;
    Ok(private_json(&page.into_items()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/quests",
    request_body = QuestDraftRequest,
    responses(
        (status = 201, description = "Created", body = Quest),
        (status = 400, description = "Invalid draft; `details.field` names the field", body = Error),
        (status = 403, description = "Not an admin", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createQuest",
    security(("SessionCookie" = []))
)]
#[post("/admin/quests")]
pub async fn create_quest(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<QuestDraftRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let (draft, image) = payload.into_inner().into_parts()?;
    let quest = state.admin.create(draft, image).await?;
    Ok(HttpResponse::Created().json(quest))
}

/// Replace every attribute of a quest.
#[utoipa::path(
    put,
    path = "/api/v1/admin/quests/{id}",
    params(("id" = i64, Path, description = "Quest id")),
    request_body = QuestDraftRequest,
    responses(
        (status = 200, description = "Updated", body = Quest),
        (status = 400, description = "Invalid draft", body = Error),
        (status = 404, description = "Unknown quest", body = Error)
    ),
    tags = ["admin"],
    operation_id = "updateQuest",
    security(("SessionCookie" = []))
)]
#[put("/admin/quests/{id}")]
pub async fn update_quest(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<i64>,
    payload: web::Json<QuestDraftRequest>,
) -> ApiResult<web::Json<Quest>> {
    require_admin(&state, &session).await?;
    let (draft, image) = payload.into_inner().into_parts()?;
    let quest = state
        .admin
        .update(QuestId::new(id.into_inner()), draft, image)
        .await?;
    Ok(web::Json(quest))
}

/// Delete a quest that has no bookings.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/quests/{id}",
    params(("id" = i64, Path, description = "Quest id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown quest", body = Error),
        (status = 409, description = "Bookings exist; `details.bookingCount` says how many", body = Error)
    ),
    tags = ["admin"],
    operation_id = "deleteQuest",
    security(("SessionCookie" = []))
)]
#[delete("/admin/quests/{id}")]
pub async fn delete_quest(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    state.admin.delete(QuestId::new(id.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a quest together with its bookings.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/quests/{id}/cascade",
    params(("id" = i64, Path, description = "Quest id")),
    responses(
        (status = 200, description = "Deleted", body = DeletedBookings),
        (status = 404, description = "Unknown quest", body = Error)
    ),
    tags = ["admin"],
    operation_id = "deleteQuestCascade",
    security(("SessionCookie" = []))
)]
#[delete("/admin/quests/{id}/cascade")]
pub async fn delete_quest_cascade(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<i64>,
) -> ApiResult<web::Json<DeletedBookings>> {
    require_admin(&state, &session).await?;
    let deleted_bookings = state
        .admin
        .delete_with_bookings(QuestId::new(id.into_inner()))
        .await?;
    Ok(web::Json(DeletedBookings { deleted_bookings }))
}

/// Delete a quest's bookings and keep the quest.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/quests/{id}/bookings",
    params(("id" = i64, Path, description = "Quest id")),
    responses(
        (status = 200, description = "Bookings removed", body = DeletedBookings),
        (status = 404, description = "Unknown quest", body = Error)
    ),
    tags = ["admin"],
    operation_id = "deleteQuestBookings",
    security(("SessionCookie" = []))
)]
#[delete("/admin/quests/{id}/bookings")]
pub async fn delete_quest_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<i64>,
) -> ApiResult<web::Json<DeletedBookings>> {
    require_admin(&state, &session).await?;
    let deleted_bookings = state
        .admin
        .delete_bookings(QuestId::new(id.into_inner()))
        .await?;
    Ok(web::Json(DeletedBookings { deleted_bookings }))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/quests/{id}/has-bookings",
    params(("id" = i64, Path, description = "Quest id")),
    responses((status = 200, description = "Booking summary", body = QuestBookingSummary)),
    tags = ["admin"],
    operation_id = "questHasBookings",
    security(("SessionCookie" = []))
)]
#[get("/admin/quests/{id}/has-bookings")]
pub async fn quest_has_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let summary = state
        .bookings
        .quest_has_bookings(QuestId::new(id.into_inner()))
        .await?;
    Ok(private_json(&summary))
}

/// All bookings, optionally for one quest.
#[utoipa::path(
    get,
    path = "/api/v1/admin/bookings",
    params(AdminBookingsQuery),
    responses(
        (status = 200, description = "Bookings, latest slot first", body = [BookingDetails]),
        (status = 400, description = "Malformed quest id", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListBookings",
    security(("SessionCookie" = []))
)]
#[get("/admin/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AdminBookingsQuery>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let quest_id = match query.quest_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(QuestId::new(parse_id("quest_id", Some(raw))?)),
    };
    let bookings = state.bookings.list_bookings(quest_id).await?;
    Ok(private_json(&bookings))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 204, description = "Cancelled"),
        (status = 404, description = "Unknown booking", body = Error)
    ),
    tags = ["admin"],
    operation_id = "cancelBooking",
    security(("SessionCookie" = []))
)]
#[delete("/admin/bookings/{id}")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    state.bookings.cancel(BookingId::new(id.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}
