//! Unit coverage for quest create, update and the deletion guard.

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    ImageStoreError, MockBookingRepository, MockImageStore, MockQuestRepository,
};
use crate::test_support::{booking_details, draft, quest};
use mockall::predicate::eq;
use rstest::rstest;

type Service = QuestLifecycleService<MockQuestRepository, MockBookingRepository, MockImageStore>;

fn service(
    quests: MockQuestRepository,
    bookings: MockBookingRepository,
    images: MockImageStore,
) -> Service {
    QuestLifecycleService::new(Arc::new(quests), Arc::new(bookings), Arc::new(images))
}

fn with_image(id: i64, path: &str) -> Quest {
    Quest {
        image_path: Some(path.to_owned()),
        ..quest(id, "Manor")
    }
}

fn png() -> ImageUpload {
    ImageUpload::new("poster.png", vec![0x89, 0x50]).expect("valid image")
}

#[rstest]
#[tokio::test]
async fn create_stores_image_then_inserts() {
    let mut images = MockImageStore::new();
    images
        .expect_save()
        .times(1)
        .return_once(|_| Ok("uploads/new.png".to_owned()));
    let mut quests = MockQuestRepository::new();
    quests
        .expect_insert()
        .withf(|_, path| path.as_deref() == Some("uploads/new.png"))
        .times(1)
        .return_once(|_, path| {
            Ok(Quest {
                image_path: path,
                ..quest(1, "Manor")
            })
        });

    let created = service(quests, MockBookingRepository::new(), images)
        .create(draft("Manor"), Some(png()))
        .await
        .expect("create succeeds");
    assert_eq!(created.image_path.as_deref(), Some("uploads/new.png"));
}

#[rstest]
#[tokio::test]
async fn failed_insert_removes_stored_image() {
    let mut images = MockImageStore::new();
    images
        .expect_save()
        .return_once(|_| Ok("uploads/orphan.png".to_owned()));
    images
        .expect_remove()
        .with(eq("uploads/orphan.png"))
        .times(1)
        .return_once(|_| Ok(()));
    let mut quests = MockQuestRepository::new();
    quests
        .expect_insert()
        .return_once(|_, _| Err(QuestRepositoryError::query("constraint")));

    let err = service(quests, MockBookingRepository::new(), images)
        .create(draft("Manor"), Some(png()))
        .await
        .expect_err("insert fails");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn update_without_image_keeps_existing_path() {
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_by_id()
        .return_once(|id| Ok(Some(with_image(id.get(), "uploads/old.png"))));
    quests
        .expect_update()
        .withf(|_, _, path| path.as_deref() == Some("uploads/old.png"))
        .return_once(|id, _, path| {
            Ok(Some(Quest {
                image_path: path,
                ..quest(id.get(), "Renamed")
            }))
        });
    let mut images = MockImageStore::new();
    images.expect_remove().never();

    let updated = service(quests, MockBookingRepository::new(), images)
        .update(QuestId::new(4), draft("Renamed"), None)
        .await
        .expect("update succeeds");
    assert_eq!(updated.image_path.as_deref(), Some("uploads/old.png"));
}

#[rstest]
#[tokio::test]
async fn update_with_image_replaces_old_file_after_row_change() {
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_by_id()
        .return_once(|id| Ok(Some(with_image(id.get(), "uploads/old.png"))));
    quests
        .expect_update()
        .return_once(|id, _, path| {
            Ok(Some(Quest {
                image_path: path,
                ..quest(id.get(), "Manor")
            }))
        });
    let mut images = MockImageStore::new();
    images
        .expect_save()
        .return_once(|_| Ok("uploads/new.png".to_owned()));
    images
        .expect_remove()
        .with(eq("uploads/old.png"))
        .times(1)
        .return_once(|_| Err(ImageStoreError::io("permission denied")));

    let updated = service(quests, MockBookingRepository::new(), images)
        .update(QuestId::new(4), draft("Manor"), Some(png()))
        .await
        .expect("removal failure does not fail the update");
    assert_eq!(updated.image_path.as_deref(), Some("uploads/new.png"));
}

#[rstest]
#[tokio::test]
async fn update_of_missing_quest_is_not_found() {
    let mut quests = MockQuestRepository::new();
    quests.expect_find_by_id().return_once(|_| Ok(None));
    let mut images = MockImageStore::new();
    images.expect_save().never();

    let err = service(quests, MockBookingRepository::new(), images)
        .update(QuestId::new(4), draft("Manor"), Some(png()))
        .await
        .expect_err("missing quest");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_is_refused_while_bookings_exist() {
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_by_id()
        .return_once(|id| Ok(Some(quest(id.get(), "Manor"))));
    quests.expect_delete().never();
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_list_details()
        .with(eq(BookingScope::Quest(QuestId::new(7))))
        .return_once(|_| Ok(vec![booking_details(1, "alice", 2000)]));

    let err = service(quests, bookings, MockImageStore::new())
        .delete(QuestId::new(7))
        .await
        .expect_err("guarded delete");
    assert_eq!(err.code(), ErrorCode::HasActiveBookings);
    let details = err.details().expect("details present");
    assert_eq!(details["bookingCount"], 1);
    assert_eq!(details["bookings"][0]["username"], "alice");
}

#[rstest]
#[tokio::test]
async fn delete_recounts_after_losing_a_race() {
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_by_id()
        .return_once(|id| Ok(Some(quest(id.get(), "Manor"))));
    quests
        .expect_delete()
        .return_once(|id| Err(QuestRepositoryError::quest_has_bookings(id.get())));
    let mut bookings = MockBookingRepository::new();
    let mut seq = mockall::Sequence::new();
    bookings
        .expect_list_details()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(Vec::new()));
    bookings
        .expect_list_details()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(vec![booking_details(3, "bob", 2000)]));

    let err = service(quests, bookings, MockImageStore::new())
        .delete(QuestId::new(7))
        .await
        .expect_err("race lost");
    assert_eq!(err.code(), ErrorCode::HasActiveBookings);
    assert_eq!(err.details().expect("details")["bookingCount"], 1);
}

#[rstest]
#[tokio::test]
async fn lost_race_reports_a_booking_even_if_recount_is_empty() {
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_by_id()
        .return_once(|id| Ok(Some(quest(id.get(), "Manor"))));
    quests
        .expect_delete()
        .return_once(|id| Err(QuestRepositoryError::quest_has_bookings(id.get())));
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_list_details()
        .times(2)
        .returning(|_| Ok(Vec::new()));

    let err = service(quests, bookings, MockImageStore::new())
        .delete(QuestId::new(7))
        .await
        .expect_err("delete refused");
    assert_eq!(err.code(), ErrorCode::HasActiveBookings);
    let details = err.details().expect("details");
    assert_eq!(details["bookingCount"], 1);
    assert_eq!(details["bookings"], serde_json::json!([]));
}

#[rstest]
#[tokio::test]
async fn delete_removes_image_of_free_quest() {
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_by_id()
        .return_once(|id| Ok(Some(with_image(id.get(), "uploads/gone.png"))));
    quests.expect_delete().return_once(|_| Ok(true));
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_list_details()
        .return_once(|_| Ok(Vec::new()));
    let mut images = MockImageStore::new();
    images
        .expect_remove()
        .with(eq("uploads/gone.png"))
        .times(1)
        .return_once(|_| Ok(()));

    service(quests, bookings, images)
        .delete(QuestId::new(7))
        .await
        .expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn cascade_reports_removed_bookings() {
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_by_id()
        .return_once(|id| Ok(Some(quest(id.get(), "Manor"))));
    quests
        .expect_delete_with_bookings()
        .with(eq(QuestId::new(7)))
        .return_once(|_| Ok(Some(3)));

    let removed = service(quests, MockBookingRepository::new(), MockImageStore::new())
        .delete_with_bookings(QuestId::new(7))
        .await
        .expect("cascade succeeds");
    assert_eq!(removed, 3);
}

#[rstest]
#[tokio::test]
async fn cascade_of_missing_quest_deletes_nothing() {
    let mut quests = MockQuestRepository::new();
    quests.expect_find_by_id().return_once(|_| Ok(None));
    quests.expect_delete_with_bookings().never();

    let err = service(quests, MockBookingRepository::new(), MockImageStore::new())
        .delete_with_bookings(QuestId::new(7))
        .await
        .expect_err("missing quest");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn bookings_only_delete_keeps_quest() {
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_by_id()
        .return_once(|id| Ok(Some(quest(id.get(), "Manor"))));
    quests.expect_delete().never();
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_delete_for_quest()
        .with(eq(QuestId::new(7)))
        .return_once(|_| Ok(2));

    let removed = service(quests, bookings, MockImageStore::new())
        .delete_bookings(QuestId::new(7))
        .await
        .expect("bookings removed");
    assert_eq!(removed, 2);
}
