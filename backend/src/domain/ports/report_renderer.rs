//! Driven port turning a [`BookingReport`] into bytes.

use crate::domain::{BookingReport, ReportFormat};

use super::define_port_error;

define_port_error! {
    pub enum ReportRenderError {
        Encode { message: String } => "report encoding failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait ReportRenderer: Send + Sync {
    /// The format this renderer produces.
    fn format(&self) -> ReportFormat;

    fn render(&self, report: &BookingReport) -> Result<Vec<u8>, ReportRenderError>;
}
