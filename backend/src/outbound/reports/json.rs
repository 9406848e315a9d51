//! JSON booking reports.

use crate::domain::ports::{ReportRenderError, ReportRenderer};
use crate::domain::{BookingReport, ReportFormat};

/// Serialises [`BookingReport`] with serde.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportRenderer;

impl ReportRenderer for JsonReportRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }

    fn render(&self, report: &BookingReport) -> Result<Vec<u8>, ReportRenderError> {
        serde_json::to_vec_pretty(report).map_err(|err| ReportRenderError::encode(err.to_string()))
    }
}
