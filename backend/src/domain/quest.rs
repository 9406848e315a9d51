//! Quest listings and the validated draft admins submit.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::{EmailAddress, Error};

pub const TITLE_MAX: usize = 150;
pub const GENRE_MAX: usize = 50;
pub const DIFFICULTY_MAX: usize = 30;
/// Largest accepted image, in decoded bytes.
pub const IMAGE_MAX_BYTES: usize = 5 * 1024 * 1024;
/// Lowercase file extensions accepted for quest images.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Database identity of a quest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct QuestId(i64);

impl QuestId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Field-level draft failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("at least one genre is required")]
    NoGenres,
    #[error("genre tags must be 1 to {max} characters")]
    InvalidGenre { max: usize },
    #[error("difficulty must be at most {max} characters")]
    DifficultyTooLong { max: usize },
    #[error("fear level must not be negative")]
    NegativeFearLevel,
    #[error("players must be at least 1")]
    TooFewPlayers,
    #[error("price must not be negative")]
    NegativePrice,
    #[error("organizer email is not valid")]
    InvalidOrganizerEmail,
    #[error("image type {extension:?} is not allowed")]
    UnsupportedImageType { extension: String },
    #[error("image must be at most {max_bytes} bytes")]
    ImageTooLarge { max_bytes: usize },
    #[error("image must not be empty")]
    EmptyImage,
}

impl QuestValidationError {
    /// The draft field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::NoGenres | Self::InvalidGenre { .. } => "genres",
            Self::DifficultyTooLong { .. } => "difficulty",
            Self::NegativeFearLevel => "fearLevel",
            Self::TooFewPlayers => "players",
            Self::NegativePrice => "price",
            Self::InvalidOrganizerEmail => "organizerEmail",
            Self::UnsupportedImageType { .. } | Self::ImageTooLarge { .. } | Self::EmptyImage => {
                "image"
            }
        }
    }
}

impl From<QuestValidationError> for Error {
    fn from(err: QuestValidationError) -> Self {
        Self::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
    }
}

/// One trimmed, lowercased genre tag of `1..=GENRE_MAX` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Genre(String);

impl Genre {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, QuestValidationError> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if length == 0 || length > GENRE_MAX {
            return Err(QuestValidationError::InvalidGenre { max: GENRE_MAX });
        }
        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for Genre {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered, de-duplicated genre tags of one quest.
///
/// # Examples
/// ```
/// use quest_backend::domain::GenreSet;
///
/// let set = GenreSet::parse(["mystic", " horror", "mystic"]).unwrap();
/// assert_eq!(set.to_strings(), vec!["horror", "mystic"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(transparent)]
pub struct GenreSet(BTreeSet<Genre>);

impl GenreSet {
    /// Parse every tag; the set may come out empty.
    pub fn parse<I, S>(tags: I) -> Result<Self, QuestValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .map(Genre::new)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        self.0.iter().any(|genre| genre.as_ref() == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Genre> {
        self.0.iter()
    }

    /// Owned strings in sorted order, the shape stored in `text[]`.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|genre| genre.0.clone()).collect()
    }
}

/// A bookable quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    #[schema(value_type = i64, example = 7)]
    pub id: QuestId,
    #[schema(example = "The Cursed Manor")]
    pub title: String,
    pub description: String,
    #[schema(value_type = Vec<String>, example = json!(["horror", "mystic"]))]
    pub genres: GenreSet,
    #[schema(example = "hard")]
    pub difficulty: String,
    pub fear_level: i32,
    pub players: i32,
    #[schema(example = 2000)]
    pub price: i32,
    pub organizer_email: Option<String>,
    #[schema(example = "uploads/5b0c1f0e4c2a4d6f9e3c1a2b3c4d5e6f.jpg")]
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated quest attributes as submitted by an admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestFields {
    pub title: String,
    pub description: String,
    pub genres: Vec<String>,
    pub difficulty: String,
    pub fear_level: i32,
    pub players: i32,
    pub price: i32,
    pub organizer_email: Option<String>,
}

/// Validated quest attributes, used for both create and full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestDraft {
    title: String,
    description: String,
    genres: GenreSet,
    difficulty: String,
    fear_level: i32,
    players: i32,
    price: i32,
    organizer_email: Option<String>,
}

impl TryFrom<QuestFields> for QuestDraft {
    type Error = QuestValidationError;

    fn try_from(fields: QuestFields) -> Result<Self, Self::Error> {
        let title = fields.title.trim();
        if title.is_empty() {
            return Err(QuestValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(QuestValidationError::TitleTooLong { max: TITLE_MAX });
        }
        let genres = GenreSet::parse(&fields.genres)?;
        if genres.is_empty() {
            return Err(QuestValidationError::NoGenres);
        }
        let difficulty = fields.difficulty.trim();
        if difficulty.chars().count() > DIFFICULTY_MAX {
            return Err(QuestValidationError::DifficultyTooLong {
                max: DIFFICULTY_MAX,
            });
        }
        if fields.fear_level < 0 {
            return Err(QuestValidationError::NegativeFearLevel);
        }
        if fields.players < 1 {
            return Err(QuestValidationError::TooFewPlayers);
        }
        if fields.price < 0 {
            return Err(QuestValidationError::NegativePrice);
        }
        let organizer_email = fields
            .organizer_email
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| {
                EmailAddress::new(value)
                    .map(|email| email.as_ref().to_owned())
                    .map_err(|_| QuestValidationError::InvalidOrganizerEmail)
            })
            .transpose()?;

        Ok(Self {
            title: title.to_owned(),
            description: fields.description,
            genres,
            difficulty: difficulty.to_owned(),
            fear_level: fields.fear_level,
            players: fields.players,
            price: fields.price,
            organizer_email,
        })
    }
}

impl QuestDraft {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn genres(&self) -> &GenreSet {
        &self.genres
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    #[must_use]
    pub const fn fear_level(&self) -> i32 {
        self.fear_level
    }

    #[must_use]
    pub const fn players(&self) -> i32 {
        self.players
    }

    #[must_use]
    pub const fn price(&self) -> i32 {
        self.price
    }

    #[must_use]
    pub fn organizer_email(&self) -> Option<&str> {
        self.organizer_email.as_deref()
    }
}

/// A decoded image accompanying a draft.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    extension: String,
    bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("extension", &self.extension)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    /// Validate an upload by its client-side filename and decoded bytes.
    ///
    /// # Examples
    /// ```
    /// use quest_backend::domain::ImageUpload;
    ///
    /// let image = ImageUpload::new("Poster.PNG", vec![1, 2, 3]).unwrap();
    /// assert_eq!(image.extension(), "png");
    /// assert!(ImageUpload::new("notes.txt", vec![1]).is_err());
    /// ```
    pub fn new(filename: &str, bytes: Vec<u8>) -> Result<Self, QuestValidationError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(QuestValidationError::UnsupportedImageType { extension });
        }
        if bytes.is_empty() {
            return Err(QuestValidationError::EmptyImage);
        }
        if bytes.len() > IMAGE_MAX_BYTES {
            return Err(QuestValidationError::ImageTooLarge {
                max_bytes: IMAGE_MAX_BYTES,
            });
        }
        Ok(Self { extension, bytes })
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
