//! Booking report model shared by every renderer.

use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use super::{BookingDetails, Error};

/// Placeholder for missing contact addresses.
pub const NOT_SPECIFIED: &str = "not specified";

/// Output format of a booking report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl ReportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    /// Parse a `format` query value; absent means CSV.
    pub fn parse(raw: Option<&str>) -> Result<Self, Error> {
        match raw.map(str::trim).map(str::to_ascii_lowercase).as_deref() {
            None | Some("" | "csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            Some(other) => Err(Error::invalid_request(format!(
                "unsupported report format {other:?}"
            ))),
        }
    }
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// 1-based position.
    pub index: usize,
    pub username: String,
    pub user_email: String,
    pub quest_title: String,
    pub organizer_email: String,
    pub price: i32,
}

/// Every booking with totals, stamped with the generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingReport {
    #[schema(value_type = String, example = "2025-06-01T18:00:00")]
    pub generated_at: NaiveDateTime,
    pub rows: Vec<ReportRow>,
    pub total_bookings: usize,
    pub total_revenue: i64,
}

impl BookingReport {
    #[must_use]
    pub fn build(bookings: &[BookingDetails], generated_at: NaiveDateTime) -> Self {
        let rows: Vec<ReportRow> = bookings
            .iter()
            .zip(1..)
            .map(|(booking, index)| ReportRow {
                index,
                username: booking.username.clone(),
                user_email: booking
                    .user_email
                    .clone()
                    .unwrap_or_else(|| NOT_SPECIFIED.to_owned()),
                quest_title: booking.quest_title.clone(),
                organizer_email: booking
                    .organizer_email
                    .clone()
                    .unwrap_or_else(|| NOT_SPECIFIED.to_owned()),
                price: booking.price,
            })
            .collect();
        let total_revenue = rows.iter().map(|row| i64::from(row.price)).sum();
        Self {
            generated_at,
            total_bookings: rows.len(),
            rows,
            total_revenue,
        }
    }

    /// `bookings_report_YYYYMMDD_HHMM.<ext>`.
    #[must_use]
    pub fn filename(&self, format: ReportFormat) -> String {
        format!(
            "bookings_report_{}.{}",
            self.generated_at.format("%Y%m%d_%H%M"),
            format.extension()
        )
    }
}

/// A rendered downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}
