//! Ports at the hexagonal boundary.
//!
//! Driving ports (`QuestCatalogue`, `BookingDesk`, `QuestAdministration`,
//! `Accounts`, `BookingReports`, `CustomerDocuments`) are called by inbound
//! adapters. Driven ports (repositories, `PasswordHasher`, `ImageStore`,
//! `ReportRenderer`) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts;
mod booking_desk;
mod booking_reports;
mod booking_repository;
mod customer_documents;
mod image_store;
mod password_hasher;
mod quest_administration;
mod quest_catalogue;
mod quest_repository;
mod report_renderer;
mod user_repository;

pub use accounts::Accounts;
#[cfg(test)]
pub use accounts::MockAccounts;
pub use booking_desk::{BookingDesk, ReservationRequest};
#[cfg(test)]
pub use booking_desk::MockBookingDesk;
pub use booking_reports::BookingReports;
#[cfg(test)]
pub use booking_reports::MockBookingReports;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use customer_documents::CustomerDocuments;
#[cfg(test)]
pub use customer_documents::MockCustomerDocuments;
pub use image_store::{ImageStore, ImageStoreError};
#[cfg(test)]
pub use image_store::MockImageStore;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use quest_administration::QuestAdministration;
#[cfg(test)]
pub use quest_administration::MockQuestAdministration;
pub use quest_catalogue::{QuestCatalogue, QuestDetail};
#[cfg(test)]
pub use quest_catalogue::MockQuestCatalogue;
pub use quest_repository::{QuestRepository, QuestRepositoryError};
#[cfg(test)]
pub use quest_repository::MockQuestRepository;
pub use report_renderer::{ReportRenderError, ReportRenderer};
#[cfg(test)]
pub use report_renderer::MockReportRenderer;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
