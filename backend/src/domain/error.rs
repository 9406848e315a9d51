//! Transport-agnostic error type shared by every domain service.
//!
//! Inbound adapters translate [`Error`] into their own envelopes; the HTTP
//! adapter maps [`ErrorCode`] onto status codes and redacts internal
//! messages.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use super::TraceId;

/// Header carrying the request trace id on every response.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Stable machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input failed parsing or validation.
    InvalidRequest,
    /// No authenticated user, or the session user no longer exists.
    Unauthorized,
    /// Authenticated but lacking the admin flag.
    Forbidden,
    /// The addressed quest, booking or user does not exist.
    NotFound,
    /// The requested slot is already booked for the quest.
    SlotUnavailable,
    /// A quest cannot be deleted while bookings reference it.
    HasActiveBookings,
    /// Any other state conflict.
    Conflict,
    /// A backing store is unreachable.
    ServiceUnavailable,
    /// Unexpected failure; the message is never shown to clients.
    InternalError,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use quest_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("quest 7 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "quest 7 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "slot_unavailable")]
    code: ErrorCode,
    #[schema(example = "this time slot is already booked")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "3f2b1f4e-8d1c-4e0a-9a57-0d3c5c1f0b11")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Build an error, picking up the trace id in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Replace the trace id.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Failure category.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace id captured at construction, if any.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured details, if any.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// [`ErrorCode::InvalidRequest`] tagged with a machine-readable reason.
    ///
    /// ```
    /// use quest_backend::domain::Error;
    ///
    /// let err = Error::validation("username_taken", "username already exists");
    /// assert_eq!(err.details().unwrap()["code"], "username_taken");
    /// ```
    pub fn validation(reason: &str, message: impl Into<String>) -> Self {
        Self::invalid_request(message).with_details(json!({ "code": reason }))
    }

    /// [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// [`ErrorCode::SlotUnavailable`].
    pub fn slot_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SlotUnavailable, message)
    }

    /// [`ErrorCode::HasActiveBookings`] with `details.bookingCount`.
    ///
    /// ```
    /// use quest_backend::domain::{Error, ErrorCode};
    ///
    /// let err = Error::has_active_bookings(3);
    /// assert_eq!(err.code(), ErrorCode::HasActiveBookings);
    /// assert_eq!(err.details().unwrap()["bookingCount"], 3);
    /// ```
    pub fn has_active_bookings(booking_count: u64) -> Self {
        Self::new(
            ErrorCode::HasActiveBookings,
            format!("quest has {booking_count} active booking(s)"),
        )
        .with_details(json!({ "bookingCount": booking_count }))
    }

    /// [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
