//! Diesel table definitions matching `migrations/`.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int8,
        #[max_length = 50]
        username -> Varchar,
        #[max_length = 120]
        email -> Nullable<Varchar>,
        password_hash -> Text,
        is_admin -> Bool,
    }
}

diesel::table! {
    /// Bookable quests. `genres` is a non-empty tag set.
    quests (id) {
        id -> Int8,
        #[max_length = 150]
        title -> Varchar,
        description -> Text,
        genres -> Array<Text>,
        #[max_length = 30]
        difficulty -> Varchar,
        fear_level -> Int4,
        players -> Int4,
        price -> Int4,
        #[max_length = 120]
        organizer_email -> Nullable<Varchar>,
        #[max_length = 200]
        image_path -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One reserved slot. `(quest_id, date_time)` is unique.
    bookings (id) {
        id -> Int8,
        user_id -> Int8,
        quest_id -> Int8,
        /// `YYYY-MM-DD HH:MM`.
        #[max_length = 16]
        date_time -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(bookings -> users (user_id));
diesel::joinable!(bookings -> quests (quest_id));

diesel::allow_tables_to_appear_in_same_query!(users, quests, bookings);
