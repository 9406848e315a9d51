//! Booking report renderers, one per [`ReportFormat`](crate::domain::ReportFormat).

mod csv;
mod json;

pub use csv::CsvReportRenderer;
pub use json::JsonReportRenderer;
