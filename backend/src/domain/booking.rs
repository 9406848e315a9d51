//! Bookings and the slot they reserve.
//!
//! A [`Slot`] is stored as the text `"YYYY-MM-DD HH:MM"`. The store keeps a
//! unique index over `(quest_id, date_time)`, so the rendering must be
//! canonical: parsing then rendering always yields zero-padded fields.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Error, QuestId, UserId};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Slot parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("date {value:?} is not a valid YYYY-MM-DD date")]
    InvalidDate { value: String },
    #[error("time {value:?} is not a valid HH:MM time")]
    InvalidTime { value: String },
    #[error("stored slot {value:?} is malformed")]
    InvalidStoredValue { value: String },
}

impl From<SlotError> for Error {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::InvalidStoredValue { .. } => Self::internal(err.to_string()),
            SlotError::InvalidDate { .. } | SlotError::InvalidTime { .. } => {
                Self::invalid_request(err.to_string())
            }
        }
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, SlotError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| SlotError::InvalidDate {
        value: raw.to_owned(),
    })
}

fn parse_time(raw: &str) -> Result<NaiveTime, SlotError> {
    NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT).map_err(|_| SlotError::InvalidTime {
        value: raw.to_owned(),
    })
}

/// A reservable (date, minute-precision time) pair.
///
/// # Examples
/// ```
/// use quest_backend::domain::Slot;
///
/// let slot = Slot::parse("2025-06-01", "18:00").unwrap();
/// assert_eq!(slot.to_string(), "2025-06-01 18:00");
/// assert_eq!(slot.time_label(), "18:00");
/// assert!(Slot::parse("2025-02-30", "18:00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct Slot {
    date: NaiveDate,
    time: NaiveTime,
}

impl Slot {
    /// Parse the `date` and `timeslot` form fields.
    pub fn parse(date: &str, timeslot: &str) -> Result<Self, SlotError> {
        Ok(Self {
            date: parse_date(date)?,
            time: parse_time(timeslot)?,
        })
    }

    /// Parse the stored `"YYYY-MM-DD HH:MM"` representation.
    pub fn from_stored(value: &str) -> Result<Self, SlotError> {
        let invalid = || SlotError::InvalidStoredValue {
            value: value.to_owned(),
        };
        let (date, time) = value.split_once(' ').ok_or_else(invalid)?;
        Self::parse(date, time).map_err(|_| invalid())
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// `HH:MM`.
    #[must_use]
    pub fn time_label(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.date.format(DATE_FORMAT),
            self.time.format(TIME_FORMAT)
        )
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        slot.to_string()
    }
}

/// Stored prefix selecting every slot on `date`.
#[must_use]
pub fn day_prefix(date: NaiveDate) -> String {
    format!("{} ", date.format(DATE_FORMAT))
}

/// Database identity of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Insert payload for a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBooking {
    pub user_id: UserId,
    pub quest_id: QuestId,
    pub slot: Slot,
}

/// A confirmed reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[schema(value_type = i64)]
    pub id: BookingId,
    #[schema(value_type = i64)]
    pub user_id: UserId,
    #[schema(value_type = i64)]
    pub quest_id: QuestId,
    #[serde(rename = "dateTime")]
    #[schema(value_type = String, example = "2025-06-01 18:00")]
    pub slot: Slot,
    pub created_at: DateTime<Utc>,
}

/// A booking joined with its user and quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    #[schema(value_type = i64)]
    pub id: BookingId,
    #[serde(rename = "dateTime")]
    #[schema(value_type = String, example = "2025-06-01 18:00")]
    pub slot: Slot,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = i64)]
    pub user_id: UserId,
    pub username: String,
    pub user_email: Option<String>,
    #[schema(value_type = i64)]
    pub quest_id: QuestId,
    pub quest_title: String,
    pub organizer_email: Option<String>,
    pub price: i32,
}

/// Which bookings a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScope {
    All,
    Quest(QuestId),
    User(UserId),
}

/// Whether a quest is referenced by bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestBookingSummary {
    pub has_bookings: bool,
    pub booking_count: u64,
}

impl QuestBookingSummary {
    #[must_use]
    pub const fn from_count(booking_count: u64) -> Self {
        Self {
            has_bookings: booking_count > 0,
            booking_count,
        }
    }
}
