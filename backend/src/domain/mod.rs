//! Domain entities, validation, ports and services.
//!
//! Nothing here knows about HTTP or SQL. Inbound adapters call the driving
//! ports in [`ports`]; the services in this module implement them on top of
//! the driven ports that outbound adapters provide.

mod account_service;
mod admin_bootstrap;
mod auth;
mod booking;
mod booking_service;
pub mod business;
mod document_service;
mod documents;
mod error;
pub(crate) mod port_errors;
pub mod ports;
mod quest;
mod quest_catalogue_service;
mod quest_lifecycle_service;
mod quest_query;
mod report;
mod report_service;
mod trace_id;
mod user;

pub use self::account_service::AccountService;
pub use self::admin_bootstrap::{BootstrapOutcome, DefaultAdmin, ensure_default_admin};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Registration, RegistrationError,
    SessionUserError, ValidRegistration,
};
pub use self::booking::{
    Booking, BookingDetails, BookingId, BookingScope, NewBooking, QuestBookingSummary, Slot,
    SlotError, day_prefix, parse_date,
};
pub use self::booking_service::BookingService;
pub use self::document_service::DocumentService;
pub use self::documents::{ReceiptRequest, StatementRequest, sanitise_filename};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::quest::{
    Genre, GenreSet, IMAGE_EXTENSIONS, IMAGE_MAX_BYTES, ImageUpload, Quest, QuestDraft,
    QuestFields, QuestId, QuestValidationError,
};
pub use self::quest_catalogue_service::QuestCatalogueService;
pub use self::quest_lifecycle_service::QuestLifecycleService;
pub use self::quest_query::{
    ListingDefaults, QuestFilter, QuestListQuery, QuestSort, RawQuestQuery, UnknownSortKey,
};
pub use self::report::{BookingReport, Download, NOT_SPECIFIED, ReportFormat, ReportRow};
pub use self::report_service::ReportService;
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, NewUser, StoredCredentials, User, UserId, UserValidationError, Username,
};
