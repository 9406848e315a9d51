//! Driving port for report downloads.

use async_trait::async_trait;

use crate::domain::{Download, Error, ReportFormat};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingReports: Send + Sync {
    async fn export(&self, format: ReportFormat) -> Result<Download, Error>;
}
