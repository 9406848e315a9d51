//! Translation of driven-port failures into [`Error`].
//!
//! Connection failures become `service_unavailable`; anything the caller
//! cannot act on becomes `internal_error` and is logged here, before the
//! HTTP layer redacts it.

use tracing::error;

use super::ports::{
    BookingRepositoryError, ImageStoreError, PasswordHashError, QuestRepositoryError,
    ReportRenderError, UserRepositoryError,
};
use super::{Error, RegistrationError};

fn internal(source: &'static str, message: impl std::fmt::Display) -> Error {
    error!(source, %message, "port failure promoted to internal error");
    Error::internal(format!("{source} failed: {message}"))
}

pub(crate) fn quest_store(err: QuestRepositoryError) -> Error {
    match err {
        QuestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("quest store unavailable: {message}"))
        }
        QuestRepositoryError::Query { message } => internal("quest store", message),
        QuestRepositoryError::QuestHasBookings { quest_id } => {
            Error::conflict(format!("quest {quest_id} is referenced by bookings"))
        }
    }
}

pub(crate) fn booking_store(err: BookingRepositoryError) -> Error {
    match err {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking store unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => internal("booking store", message),
        BookingRepositoryError::SlotTaken { .. } => {
            Error::slot_unavailable("this time slot is already booked")
        }
        BookingRepositoryError::QuestNotFound { quest_id } => {
            Error::not_found(format!("quest {quest_id} not found"))
        }
        BookingRepositoryError::UserNotFound { user_id } => {
            Error::not_found(format!("user {user_id} not found"))
        }
    }
}

pub(crate) fn user_store(err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => internal("user store", message),
        UserRepositoryError::DuplicateUsername { .. } => RegistrationError::UsernameTaken.into(),
        UserRepositoryError::DuplicateEmail { .. } => RegistrationError::EmailTaken.into(),
    }
}

pub(crate) fn password_hasher(err: PasswordHashError) -> Error {
    internal("password hasher", err)
}

pub(crate) fn image_store(err: ImageStoreError) -> Error {
    internal("image store", err)
}

pub(crate) fn report_renderer(err: ReportRenderError) -> Error {
    internal("report renderer", err)
}
