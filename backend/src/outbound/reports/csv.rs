//! CSV booking reports with RFC 4180 quoting and CRLF line endings.

use crate::domain::business;
use crate::domain::ports::{ReportRenderError, ReportRenderer};
use crate::domain::{BookingReport, ReportFormat};

const HEADER: [&str; 6] = [
    "#",
    "Username",
    "User email",
    "Quest",
    "Organizer email",
    "Price",
];

/// Renders [`BookingReport`]s as CSV.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReportRenderer;

/// Quote `field` when it holds a delimiter, quote or line break.
fn quote(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

fn push_record<I, S>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let line = fields
        .into_iter()
        .map(|field| quote(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push_str("\r\n");
}

impl ReportRenderer for CsvReportRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }

    fn render(&self, report: &BookingReport) -> Result<Vec<u8>, ReportRenderError> {
        let mut out = String::new();
        push_record(&mut out, [format!("{} - {}", business::NAME, business::TAGLINE)]);
        push_record(&mut out, [business::ADDRESS]);
        push_record(&mut out, [format!("Phone: {}", business::PHONE)]);
        push_record(&mut out, [format!("Email: {}", business::EMAIL)]);
        push_record(&mut out, ["Bookings report"]);
        push_record(
            &mut out,
            [format!(
                "Generated: {}",
                report.generated_at.format("%d.%m.%Y %H:%M")
            )],
        );
        out.push_str("\r\n");

        push_record(&mut out, HEADER);
        for row in &report.rows {
            push_record(
                &mut out,
                [
                    row.index.to_string(),
                    row.username.clone(),
                    row.user_email.clone(),
                    row.quest_title.clone(),
                    row.organizer_email.clone(),
                    row.price.to_string(),
                ],
            );
        }
        push_record(
            &mut out,
            [
                "Total".to_owned(),
                String::new(),
                String::new(),
                format!("{} bookings", report.total_bookings),
                String::new(),
                report.total_revenue.to_string(),
            ],
        );
        Ok(out.into_bytes())
    }
}
