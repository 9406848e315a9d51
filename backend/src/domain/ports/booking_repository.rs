//! Driven port for booking storage.
//!
//! Adapters must enforce slot uniqueness atomically in the store and report
//! a lost race as [`BookingRepositoryError::SlotTaken`].

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    Booking, BookingDetails, BookingId, BookingScope, NewBooking, QuestId, Slot,
};

use super::define_port_error;

define_port_error! {
    /// Failures raised by booking repository adapters.
    pub enum BookingRepositoryError {
        Connection { message: String } => "booking repository connection failed: {message}",
        Query { message: String } => "booking repository query failed: {message}",
        SlotTaken { slot: String } => "slot {slot} is already booked",
        QuestNotFound { quest_id: i64 } => "quest {quest_id} does not exist",
        UserNotFound { user_id: i64 } => "user {user_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: &NewBooking) -> Result<Booking, BookingRepositoryError>;

    /// Slots booked for `quest_id` on `date`, in any order.
    async fn booked_slots_on(
        &self,
        quest_id: QuestId,
        date: NaiveDate,
    ) -> Result<Vec<Slot>, BookingRepositoryError>;

    /// Joined listing, newest slot first.
    async fn list_details(
        &self,
        scope: BookingScope,
    ) -> Result<Vec<BookingDetails>, BookingRepositoryError>;

    async fn count_for_quest(&self, quest_id: QuestId) -> Result<u64, BookingRepositoryError>;

    /// `false` when the booking was missing.
    async fn delete(&self, id: BookingId) -> Result<bool, BookingRepositoryError>;

    /// Remove every booking of a quest, returning how many went.
    async fn delete_for_quest(&self, quest_id: QuestId) -> Result<u64, BookingRepositoryError>;
}
