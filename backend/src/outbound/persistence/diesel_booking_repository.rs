//! PostgreSQL-backed `BookingRepository`.
//!
//! The `bookings_quest_slot_key` unique constraint is the only arbiter of
//! slot ownership: two concurrent inserts for the same quest and slot
//! cannot both commit, and the loser is reported as `SlotTaken`.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{
    Booking, BookingDetails, BookingId, BookingScope, NewBooking, QuestId, Slot, day_prefix,
};

use super::diesel_error::{DbFailure, classify};
use super::models::{BookingDetailsRow, BookingRow, InvalidRow, NewBookingRow, row_count};
use super::pool::{DbPool, PoolError};
use super::schema::{bookings, quests, users};

const SLOT_KEY: &str = "bookings_quest_slot_key";
const QUEST_FK: &str = "bookings_quest_id_fkey";
const USER_FK: &str = "bookings_user_id_fkey";

/// Diesel implementation of [`BookingRepository`].
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookingRepositoryError {
    BookingRepositoryError::connection(error.into_message())
}

fn map_failure(failure: DbFailure) -> BookingRepositoryError {
    match failure {
        DbFailure::Connection(message) => BookingRepositoryError::connection(message),
        DbFailure::Query(message) => BookingRepositoryError::query(message),
        DbFailure::UniqueViolation { .. } | DbFailure::ForeignKeyViolation { .. } => {
            BookingRepositoryError::query("constraint violation")
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    map_failure(classify(error))
}

/// Translate insert failures into the slot and reference variants.
fn map_insert_error(error: diesel::result::Error, booking: &NewBooking) -> BookingRepositoryError {
    match classify(error) {
        failure if failure.violates(SLOT_KEY) => {
            BookingRepositoryError::slot_taken(booking.slot.to_string())
        }
        failure if failure.violates(QUEST_FK) => {
            BookingRepositoryError::quest_not_found(booking.quest_id.get())
        }
        failure if failure.violates(USER_FK) => {
            BookingRepositoryError::user_not_found(booking.user_id.get())
        }
        failure => map_failure(failure),
    }
}

fn map_invalid_row(error: InvalidRow) -> BookingRepositoryError {
    warn!(%error, "discarding unreadable booking row");
    BookingRepositoryError::query(error.to_string())
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert(&self, booking: &NewBooking) -> Result<Booking, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let date_time = booking.slot.to_string();
        let row = diesel::insert_into(bookings::table)
            .values(&NewBookingRow {
                user_id: booking.user_id.get(),
                quest_id: booking.quest_id.get(),
                date_time: &date_time,
            })
            .returning(BookingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, booking))?;
        Booking::try_from(row).map_err(map_invalid_row)
    }

    async fn booked_slots_on(
        &self,
        quest_id: QuestId,
        date: NaiveDate,
    ) -> Result<Vec<Slot>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored = bookings::table
            .filter(bookings::quest_id.eq(quest_id.get()))
            .filter(bookings::date_time.like(format!("{}%", day_prefix(date))))
            .select(bookings::date_time)
            .load::<String>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        stored
            .iter()
            .map(|value| {
                Slot::from_stored(value)
                    .map_err(|err| BookingRepositoryError::query(err.to_string()))
            })
            .collect()
    }

    async fn list_details(
        &self,
        scope: BookingScope,
    ) -> Result<Vec<BookingDetails>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut statement = bookings::table
            .inner_join(users::table)
            .inner_join(quests::table)
            .select((
                bookings::id,
                bookings::date_time,
                bookings::created_at,
                users::id,
                users::username,
                users::email,
                quests::id,
                quests::title,
                quests::organizer_email,
                quests::price,
            ))
            .order_by((bookings::date_time.desc(), bookings::id.desc()))
            .into_boxed();
        statement = match scope {
            BookingScope::All => statement,
            BookingScope::Quest(quest_id) => {
                statement.filter(bookings::quest_id.eq(quest_id.get()))
            }
            BookingScope::User(user_id) => statement.filter(bookings::user_id.eq(user_id.get())),
        };
        let rows = statement
            .load::<BookingDetailsRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| BookingDetails::try_from(row).map_err(map_invalid_row))
            .collect()
    }

    async fn count_for_quest(&self, quest_id: QuestId) -> Result<u64, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count = bookings::table
            .filter(bookings::quest_id.eq(quest_id.get()))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_count(count))
    }

    async fn delete(&self, id: BookingId) -> Result<bool, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(bookings::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn delete_for_quest(&self, quest_id: QuestId) -> Result<u64, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(bookings::table.filter(bookings::quest_id.eq(quest_id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_count(deleted))
    }
}
