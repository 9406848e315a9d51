//! Row structs for the Diesel schema and their conversion into domain types.
//!
//! Rows decode leniently; conversion re-validates stored values and reports
//! corrupt data as [`InvalidRow`] rather than panicking.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Booking, BookingDetails, BookingId, EmailAddress, GenreSet, Quest, QuestDraft, QuestId, Slot,
    StoredCredentials, User, UserId, Username,
};

use super::schema::{bookings, quests, users};

/// A stored row failed domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored {table} row {id} is invalid: {reason}")]
pub(crate) struct InvalidRow {
    table: &'static str,
    id: i64,
    reason: String,
}

impl InvalidRow {
    fn new(table: &'static str, id: i64, reason: impl ToString) -> Self {
        Self {
            table,
            id,
            reason: reason.to_string(),
        }
    }
}

/// Row count as `u64`, saturating when the driver value does not fit.
pub(crate) fn row_count<N: TryInto<u64>>(rows: N) -> u64 {
    rows.try_into().unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub is_admin: bool,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, InvalidRow> {
        self.into_credentials().map(|credentials| credentials.user)
    }

    pub(crate) fn into_credentials(self) -> Result<StoredCredentials, InvalidRow> {
        let username =
            Username::new(&self.username).map_err(|err| InvalidRow::new("users", self.id, err))?;
        let email = self
            .email
            .as_deref()
            .map(EmailAddress::new)
            .transpose()
            .map_err(|err| InvalidRow::new("users", self.id, err))?;
        Ok(StoredCredentials {
            user: User {
                id: UserId::new(self.id),
                username,
                email,
                is_admin: self.is_admin,
            },
            password_hash: self.password_hash,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub password_hash: &'a str,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = quests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub genres: Vec<String>,
    pub difficulty: String,
    pub fear_level: i32,
    pub players: i32,
    pub price: i32,
    pub organizer_email: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<QuestRow> for Quest {
    type Error = InvalidRow;

    fn try_from(row: QuestRow) -> Result<Self, Self::Error> {
        let genres =
            GenreSet::parse(&row.genres).map_err(|err| InvalidRow::new("quests", row.id, err))?;
        Ok(Self {
            id: QuestId::new(row.id),
            title: row.title,
            description: row.description,
            genres,
            difficulty: row.difficulty,
            fear_level: row.fear_level,
            players: row.players,
            price: row.price,
            organizer_email: row.organizer_email,
            image_path: row.image_path,
            created_at: row.created_at,
        })
    }
}

/// Every editable quest column. Serves both insert and full replacement,
/// so `None` clears the column on update.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = quests)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct QuestWriteRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub genres: Vec<String>,
    pub difficulty: &'a str,
    pub fear_level: i32,
    pub players: i32,
    pub price: i32,
    pub organizer_email: Option<&'a str>,
    pub image_path: Option<&'a str>,
}

impl<'a> QuestWriteRow<'a> {
    pub(crate) fn new(draft: &'a QuestDraft, image_path: Option<&'a str>) -> Self {
        Self {
            title: draft.title(),
            description: draft.description(),
            genres: draft.genres().to_strings(),
            difficulty: draft.difficulty(),
            fear_level: draft.fear_level(),
            players: draft.players(),
            price: draft.price(),
            organizer_email: draft.organizer_email(),
            image_path,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: i64,
    pub user_id: i64,
    pub quest_id: i64,
    pub date_time: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = InvalidRow;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let slot =
            Slot::from_stored(&row.date_time).map_err(|err| InvalidRow::new("bookings", row.id, err))?;
        Ok(Self {
            id: BookingId::new(row.id),
            user_id: UserId::new(row.user_id),
            quest_id: QuestId::new(row.quest_id),
            slot,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub user_id: i64,
    pub quest_id: i64,
    pub date_time: &'a str,
}

/// Booking joined with its user and quest, in select-tuple order.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct BookingDetailsRow {
    pub id: i64,
    pub date_time: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
    pub username: String,
    pub user_email: Option<String>,
    pub quest_id: i64,
    pub quest_title: String,
    pub organizer_email: Option<String>,
    pub price: i32,
}

impl TryFrom<BookingDetailsRow> for BookingDetails {
    type Error = InvalidRow;

    fn try_from(row: BookingDetailsRow) -> Result<Self, Self::Error> {
        let slot =
            Slot::from_stored(&row.date_time).map_err(|err| InvalidRow::new("bookings", row.id, err))?;
        Ok(Self {
            id: BookingId::new(row.id),
            slot,
            created_at: row.created_at,
            user_id: UserId::new(row.user_id),
            username: row.username,
            user_email: row.user_email,
            quest_id: QuestId::new(row.quest_id),
            quest_title: row.quest_title,
            organizer_email: row.organizer_email,
            price: row.price,
        })
    }
}
