//! Reservation service implementing [`BookingDesk`].
//!
//! Slot uniqueness is decided by the store. The service never checks
//! availability before inserting; it only translates the store's verdict.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{BookingDesk, BookingRepository, QuestRepository, ReservationRequest};
use super::quest_catalogue_service::time_labels;
use super::{
    Booking, BookingDetails, BookingId, BookingScope, Error, NewBooking, QuestBookingSummary,
    QuestId, Slot, UserId, parse_date, port_errors,
};

#[derive(Clone)]
pub struct BookingService<Q, B> {
    quests: Arc<Q>,
    bookings: Arc<B>,
}

impl<Q, B> BookingService<Q, B> {
    pub fn new(quests: Arc<Q>, bookings: Arc<B>) -> Self {
        Self { quests, bookings }
    }
}

impl<Q, B> BookingService<Q, B>
where
    Q: QuestRepository,
    B: BookingRepository,
{
    async fn ensure_quest_exists(&self, id: QuestId) -> Result<(), Error> {
        self.quests
            .find_by_id(id)
            .await
            .map_err(port_errors::quest_store)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("quest {id} not found")))
    }
}

#[async_trait]
impl<Q, B> BookingDesk for BookingService<Q, B>
where
    Q: QuestRepository,
    B: BookingRepository,
{
    async fn reserve(
        &self,
        user_id: UserId,
        request: &ReservationRequest,
    ) -> Result<Booking, Error> {
        let slot = Slot::parse(&request.date, &request.timeslot)?;
        self.ensure_quest_exists(request.quest_id).await?;
        let booking = self
            .bookings
            .insert(&NewBooking {
                user_id,
                quest_id: request.quest_id,
                slot,
            })
            .await
            .map_err(port_errors::booking_store)?;
        info!(
            booking_id = %booking.id,
            quest_id = %booking.quest_id,
            user_id = %booking.user_id,
            slot = %booking.slot,
            "slot reserved"
        );
        Ok(booking)
    }

    async fn slots_booked_for_quest_on_date(
        &self,
        quest_id: QuestId,
        date: &str,
    ) -> Result<Vec<String>, Error> {
        let date = parse_date(date)?;
        let slots = self
            .bookings
            .booked_slots_on(quest_id, date)
            .await
            .map_err(port_errors::booking_store)?;
        Ok(time_labels(&slots))
    }

    async fn cancel(&self, booking_id: BookingId) -> Result<(), Error> {
        let deleted = self
            .bookings
            .delete(booking_id)
            .await
            .map_err(port_errors::booking_store)?;
        if !deleted {
            return Err(Error::not_found(format!("booking {booking_id} not found")));
        }
        info!(%booking_id, "booking cancelled");
        Ok(())
    }

    async fn bookings_for_user(&self, user_id: UserId) -> Result<Vec<BookingDetails>, Error> {
        self.bookings
            .list_details(BookingScope::User(user_id))
            .await
            .map_err(port_errors::booking_store)
    }

    async fn list_bookings(
        &self,
        quest_id: Option<QuestId>,
    ) -> Result<Vec<BookingDetails>, Error> {
        let scope = quest_id.map_or(BookingScope::All, BookingScope::Quest);
        self.bookings
            .list_details(scope)
            .await
            .map_err(port_errors::booking_store)
    }

    async fn quest_has_bookings(&self, quest_id: QuestId) -> Result<QuestBookingSummary, Error> {
        self.ensure_quest_exists(quest_id).await?;
        let count = self
            .bookings
            .count_for_quest(quest_id)
            .await
            .map_err(port_errors::booking_store)?;
        Ok(QuestBookingSummary::from_count(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{BookingRepositoryError, MockBookingRepository, MockQuestRepository};
    use crate::test_support::{booking, quest, slot};
    use chrono::NaiveDate;
    use mockall::predicate::{always, eq};
    use rstest::{fixture, rstest};

    type Service = BookingService<MockQuestRepository, MockBookingRepository>;

    fn service(quests: MockQuestRepository, bookings: MockBookingRepository) -> Service {
        BookingService::new(Arc::new(quests), Arc::new(bookings))
    }

    #[fixture]
    fn existing_quest() -> MockQuestRepository {
        let mut quests = MockQuestRepository::new();
        quests
            .expect_find_by_id()
            .returning(|id| Ok(Some(quest(id.get(), "Manor"))));
        quests
    }

    fn request(date: &str, timeslot: &str) -> ReservationRequest {
        ReservationRequest {
            quest_id: QuestId::new(7),
            date: date.to_owned(),
            timeslot: timeslot.to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn reserve_inserts_canonical_slot(existing_quest: MockQuestRepository) {
        let mut bookings = MockBookingRepository::new();
        let expected = NewBooking {
            user_id: UserId::new(1),
            quest_id: QuestId::new(7),
            slot: slot("2025-06-01", "18:00"),
        };
        bookings
            .expect_insert()
            .with(eq(expected))
            .times(1)
            .return_once(|new| Ok(booking(10, 1, 7, new.slot)));

        let created = service(existing_quest, bookings)
            .reserve(UserId::new(1), &request("2025-06-01", "18:00"))
            .await
            .expect("reservation succeeds");
        assert_eq!(created.slot.to_string(), "2025-06-01 18:00");
    }

    #[rstest]
    #[tokio::test]
    async fn taken_slot_is_unavailable(existing_quest: MockQuestRepository) {
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_insert()
            .times(1)
            .return_once(|_| Err(BookingRepositoryError::slot_taken("2025-06-01 18:00")));

        let err = service(existing_quest, bookings)
            .reserve(UserId::new(2), &request("2025-06-01", "18:00"))
            .await
            .expect_err("slot taken");
        assert_eq!(err.code(), ErrorCode::SlotUnavailable);
    }

    #[rstest]
    #[case("2025-02-30", "18:00")]
    #[case("2025-06-01", "6pm")]
    #[tokio::test]
    async fn malformed_slot_is_rejected_before_any_lookup(
        #[case] date: &str,
        #[case] timeslot: &str,
    ) {
        let err = service(MockQuestRepository::new(), MockBookingRepository::new())
            .reserve(UserId::new(1), &request(date, timeslot))
            .await
            .expect_err("invalid slot");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_quest_is_not_found() {
        let mut quests = MockQuestRepository::new();
        quests.expect_find_by_id().return_once(|_| Ok(None));
        let mut bookings = MockBookingRepository::new();
        bookings.expect_insert().never();

        let err = service(quests, bookings)
            .reserve(UserId::new(1), &request("2025-06-01", "18:00"))
            .await
            .expect_err("missing quest");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn quest_deleted_mid_reservation_is_not_found(existing_quest: MockQuestRepository) {
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_insert()
            .return_once(|_| Err(BookingRepositoryError::quest_not_found(7_i64)));

        let err = service(existing_quest, bookings)
            .reserve(UserId::new(1), &request("2025-06-01", "18:00"))
            .await
            .expect_err("quest vanished");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn booked_slots_are_distinct_times() {
        let mut bookings = MockBookingRepository::new();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("date");
        bookings
            .expect_booked_slots_on()
            .with(eq(QuestId::new(7)), eq(date))
            .return_once(|_, _| {
                Ok(vec![
                    slot("2025-06-01", "20:00"),
                    slot("2025-06-01", "10:00"),
                    slot("2025-06-01", "14:00"),
                ])
            });

        let times = service(MockQuestRepository::new(), bookings)
            .slots_booked_for_quest_on_date(QuestId::new(7), "2025-06-01")
            .await
            .expect("lookup succeeds");
        assert_eq!(times, vec!["10:00", "14:00", "20:00"]);
    }

    #[rstest]
    #[tokio::test]
    async fn booked_slots_reject_bad_dates() {
        let err = service(MockQuestRepository::new(), MockBookingRepository::new())
            .slots_booked_for_quest_on_date(QuestId::new(7), "tomorrow")
            .await
            .expect_err("bad date");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::NotFound))]
    #[tokio::test]
    async fn cancel_reports_missing_bookings(
        #[case] deleted: bool,
        #[case] expected: Option<ErrorCode>,
    ) {
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_delete()
            .with(eq(BookingId::new(5)))
            .return_once(move |_| Ok(deleted));

        let result = service(MockQuestRepository::new(), bookings)
            .cancel(BookingId::new(5))
            .await;
        assert_eq!(result.err().map(|err| err.code()), expected);
    }

    #[rstest]
    #[case(None, BookingScope::All)]
    #[case(Some(QuestId::new(3)), BookingScope::Quest(QuestId::new(3)))]
    #[tokio::test]
    async fn listing_scope_follows_filter(
        #[case] quest_id: Option<QuestId>,
        #[case] scope: BookingScope,
    ) {
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_list_details()
            .with(eq(scope))
            .times(1)
            .return_once(|_| Ok(Vec::new()));

        let listed = service(MockQuestRepository::new(), bookings)
            .list_bookings(quest_id)
            .await
            .expect("listing succeeds");
        assert!(listed.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn summary_counts_bookings(existing_quest: MockQuestRepository) {
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_count_for_quest()
            .with(always())
            .return_once(|_| Ok(2));

        let summary = service(existing_quest, bookings)
            .quest_has_bookings(QuestId::new(7))
            .await
            .expect("summary succeeds");
        assert_eq!(summary, QuestBookingSummary::from_count(2));
    }
}
