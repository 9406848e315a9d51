//! Printable customer documents.
//!
//! ```text
//! POST /api/v1/documents/statement {"fullName":"…","passportSeries":"…","passportNumber":"…","questTitle":"…"}
//! POST /api/v1/documents/receipt {"questTitle":"…","questPrice":2000}
//! ```

use actix_web::{HttpResponse, post, web};

use crate::domain::{Error, ReceiptRequest, StatementRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_user;
use crate::inbound::http::responses::attachment;
use crate::inbound::http::schemas::{ReceiptBody, StatementBody};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Participation waiver filled with the caller's passport data.
#[utoipa::path(
    post,
    path = "/api/v1/documents/statement",
    request_body = StatementBody,
    responses(
        (status = 200, description = "Plain-text attachment", content_type = "text/plain"),
        (status = 400, description = "A field is blank; `details.field` names it", body = Error),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["documents"],
    operation_id = "statement",
    security(("SessionCookie" = []))
)]
#[post("/documents/statement")]
pub async fn statement(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<StatementBody>,
) -> ApiResult<HttpResponse> {
    current_user(&state, &session).await?;
    let request = StatementRequest::new(
        &payload.full_name,
        &payload.passport_series,
        &payload.passport_number,
        &payload.quest_title,
    )?;
    Ok(attachment(state.documents.statement(&request)))
}

/// Payment receipt issued to the caller.
#[utoipa::path(
    post,
    path = "/api/v1/documents/receipt",
    request_body = ReceiptBody,
    responses(
        (status = 200, description = "Plain-text attachment", content_type = "text/plain"),
        (status = 400, description = "Blank title or negative price", body = Error),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["documents"],
    operation_id = "receipt",
    security(("SessionCookie" = []))
)]
#[post("/documents/receipt")]
pub async fn receipt(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ReceiptBody>,
) -> ApiResult<HttpResponse> {
    let user = current_user(&state, &session).await?;
    let request = ReceiptRequest::new(&payload.quest_title, payload.quest_price)?;
    Ok(attachment(state.documents.receipt(&user, &request)))
}
