//! Booking report export implementing [`BookingReports`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{BookingReports, BookingRepository, ReportRenderer};
use super::{BookingReport, BookingScope, Download, Error, ReportFormat, port_errors};

pub struct ReportService<B> {
    bookings: Arc<B>,
    renderers: Vec<Arc<dyn ReportRenderer>>,
    clock: Arc<dyn Clock>,
}

impl<B> ReportService<B> {
    pub fn new(
        bookings: Arc<B>,
        renderers: Vec<Arc<dyn ReportRenderer>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bookings,
            renderers,
            clock,
        }
    }

    fn renderer(&self, format: ReportFormat) -> Result<&dyn ReportRenderer, Error> {
        self.renderers
            .iter()
            .find(|renderer| renderer.format() == format)
            .map(|renderer| renderer.as_ref())
            .ok_or_else(|| {
                Error::invalid_request(format!(
                    "report format {} is not available",
                    format.extension()
                ))
            })
    }
}

#[async_trait]
impl<B> BookingReports for ReportService<B>
where
    B: BookingRepository,
{
    async fn export(&self, format: ReportFormat) -> Result<Download, Error> {
        let renderer = self.renderer(format)?;
        let bookings = self
            .bookings
            .list_details(BookingScope::All)
            .await
            .map_err(port_errors::booking_store)?;
        let report = BookingReport::build(&bookings, self.clock.local().naive_local());
        let bytes = renderer
            .render(&report)
            .map_err(port_errors::report_renderer)?;
        info!(
            format = format.extension(),
            bookings = report.total_bookings,
            "booking report exported"
        );
        Ok(Download {
            filename: report.filename(format),
            content_type: format.content_type(),
            bytes,
        })
    }
}
