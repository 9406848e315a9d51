//! Booking report download.
//!
//! ```text
//! GET /api/v1/admin/reports/bookings?format=csv
//! ```

use actix_web::{HttpResponse, get, web};
use tracing::info;

use crate::domain::{Error, ReportFormat};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::responses::attachment;
use crate::inbound::http::schemas::ReportQuery;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Every booking with totals, as CSV (default) or JSON.
#[utoipa::path(
    get,
    path = "/api/v1/admin/reports/bookings",
    params(ReportQuery),
    responses(
        (status = 200, description = "Report attachment",
            headers(("Content-Disposition" = String, description = "attachment; filename*=UTF-8''bookings_report_YYYYMMDD_HHMM.csv"))),
        (status = 400, description = "Unknown format", body = Error),
        (status = 403, description = "Not an admin", body = Error)
    ),
    tags = ["admin"],
    operation_id = "exportBookings",
    security(("SessionCookie" = []))
)]
#[get("/admin/reports/bookings")]
pub async fn export_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ReportQuery>,
) -> ApiResult<HttpResponse> {
    let admin = require_admin(&state, &session).await?;
    let format = ReportFormat::parse(query.format.as_deref())?;
    let download = state.reports.export(format).await?;
    info!(filename = %download.filename, admin = %admin.username, "booking report exported");
    Ok(attachment(download))
}
