//! Dependencies shared by every handler through `web::Data<HttpState>`.

use std::sync::Arc;

use crate::domain::ListingDefaults;
use crate::domain::ports::{
    Accounts, BookingDesk, BookingReports, CustomerDocuments, QuestAdministration,
    QuestCatalogue,
};

/// Driving ports plus listing defaults. Handlers never see adapters.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: Arc<dyn QuestCatalogue>,
    pub bookings: Arc<dyn BookingDesk>,
    pub admin: Arc<dyn QuestAdministration>,
    pub accounts: Arc<dyn Accounts>,
    pub reports: Arc<dyn BookingReports>,
    pub documents: Arc<dyn CustomerDocuments>,
    /// Sort and page size applied when a listing request omits them.
    pub listing: ListingDefaults,
}
