//! Fixtures shared by unit tests across the crate.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Booking, BookingDetails, BookingId, GenreSet, Quest, QuestDraft, QuestFields, QuestId, Slot,
    User, UserId, Username,
};

/// Clock frozen at a local wall-clock time.
pub(crate) struct FixtureClock {
    now: DateTime<Local>,
}

impl FixtureClock {
    pub(crate) fn at(date: (i32, u32, u32), time: (u32, u32)) -> Arc<dyn Clock> {
        let naive = NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .and_then(|d| d.and_hms_opt(time.0, time.1, 0))
            .expect("valid fixture timestamp");
        let now = Local
            .from_local_datetime(&naive)
            .earliest()
            .expect("representable local time");
        Arc::new(Self { now })
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }
}

pub(crate) fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(crate) fn user(id: i64, name: &str, is_admin: bool) -> User {
    User {
        id: UserId::new(id),
        username: Username::new(name).expect("valid username"),
        email: None,
        is_admin,
    }
}

pub(crate) fn quest(id: i64, title: &str) -> Quest {
    Quest {
        id: QuestId::new(id),
        title: title.to_owned(),
        description: String::new(),
        genres: GenreSet::parse(["horror"]).expect("valid genres"),
        difficulty: "hard".to_owned(),
        fear_level: 3,
        players: 4,
        price: 2000,
        organizer_email: Some("alibi@mail.ru".to_owned()),
        image_path: None,
        created_at: created_at(),
    }
}

pub(crate) fn draft(title: &str) -> QuestDraft {
    QuestDraft::try_from(QuestFields {
        title: title.to_owned(),
        description: String::new(),
        genres: vec!["horror".to_owned()],
        difficulty: "hard".to_owned(),
        fear_level: 3,
        players: 4,
        price: 2000,
        organizer_email: None,
    })
    .expect("valid draft")
}

pub(crate) fn slot(date: &str, time: &str) -> Slot {
    Slot::parse(date, time).expect("valid slot")
}

pub(crate) fn booking(id: i64, user_id: i64, quest_id: i64, at: Slot) -> Booking {
    Booking {
        id: BookingId::new(id),
        user_id: UserId::new(user_id),
        quest_id: QuestId::new(quest_id),
        slot: at,
        created_at: created_at(),
    }
}

pub(crate) fn booking_details(id: i64, username: &str, price: i32) -> BookingDetails {
    BookingDetails {
        id: BookingId::new(id),
        slot: slot("2025-06-01", "18:00"),
        created_at: created_at(),
        user_id: UserId::new(1),
        username: username.to_owned(),
        user_email: None,
        quest_id: QuestId::new(7),
        quest_title: "Manor".to_owned(),
        organizer_email: Some("alibi@mail.ru".to_owned()),
        price,
    }
}
