//! Driving port for reservations.

use async_trait::async_trait;

use crate::domain::{
    Booking, BookingDetails, BookingId, Error, QuestBookingSummary, QuestId, UserId,
};

/// Raw reservation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    pub quest_id: QuestId,
    pub date: String,
    pub timeslot: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingDesk: Send + Sync {
    /// Reserve a slot. A taken slot fails with `SlotUnavailable`.
    async fn reserve(&self, user_id: UserId, request: &ReservationRequest)
    -> Result<Booking, Error>;

    /// Distinct `HH:MM` labels booked for the quest on `date`, ascending.
    async fn slots_booked_for_quest_on_date(
        &self,
        quest_id: QuestId,
        date: &str,
    ) -> Result<Vec<String>, Error>;

    async fn cancel(&self, booking_id: BookingId) -> Result<(), Error>;

    async fn bookings_for_user(&self, user_id: UserId) -> Result<Vec<BookingDetails>, Error>;

    /// Every booking, or those of one quest.
    async fn list_bookings(&self, quest_id: Option<QuestId>)
    -> Result<Vec<BookingDetails>, Error>;

    async fn quest_has_bookings(&self, quest_id: QuestId) -> Result<QuestBookingSummary, Error>;
}
