//! Catalogue filters, sort keys and lenient parsing of raw query strings.

use std::fmt;
use std::str::FromStr;

use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalogue ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestSort {
    TitleAsc,
    TitleDesc,
    #[default]
    Newest,
    Oldest,
    PriceLow,
    PriceHigh,
}

impl QuestSort {
    pub const ALL: [Self; 6] = [
        Self::TitleAsc,
        Self::TitleDesc,
        Self::Newest,
        Self::Oldest,
        Self::PriceLow,
        Self::PriceHigh,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::PriceLow => "price_low",
            Self::PriceHigh => "price_high",
        }
    }

    /// Whether the id tiebreak runs descending.
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::TitleDesc | Self::Newest | Self::PriceHigh)
    }
}

impl fmt::Display for QuestSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned for sort keys outside [`QuestSort::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key {0:?}")]
pub struct UnknownSortKey(pub String);

impl FromStr for QuestSort {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == key)
            .ok_or_else(|| UnknownSortKey(key.to_owned()))
    }
}

/// Optional catalogue filters. An empty filter matches every quest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestFilter {
    /// Case-insensitive title substring, matched literally.
    pub title_contains: Option<String>,
    /// Tags a quest must all carry.
    pub genres: Vec<String>,
    /// Labels of which a quest must match one.
    pub difficulties: Vec<String>,
    /// Minimum fear level.
    pub min_fear_level: Option<i32>,
    /// Maximum group size a quest may require.
    pub max_players: Option<i32>,
}

impl QuestFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A fully resolved catalogue request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestListQuery {
    pub filter: QuestFilter,
    pub sort: QuestSort,
    pub page: PageRequest,
}

/// Fallbacks applied while parsing raw parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingDefaults {
    pub sort: QuestSort,
    pub page_size: u32,
}

impl Default for ListingDefaults {
    fn default() -> Self {
        Self {
            sort: QuestSort::Newest,
            page_size: 15,
        }
    }
}

/// Raw, string-typed catalogue parameters exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuestQuery {
    pub q: Option<String>,
    pub genre: Option<String>,
    pub difficulty: Option<String>,
    pub fear_level: Option<String>,
    pub players: Option<String>,
    pub sort: Option<String>,
    pub skip: Option<String>,
    pub limit: Option<String>,
}

impl QuestListQuery {
    /// Every quest in default order, up to the largest page.
    #[must_use]
    pub fn everything(defaults: ListingDefaults) -> Self {
        Self {
            filter: QuestFilter::default(),
            sort: defaults.sort,
            page: PageRequest::everything(),
        }
    }

    /// Parse raw parameters without ever failing.
    ///
    /// Blank values, blank list entries and malformed integers are dropped;
    /// an unknown sort key falls back to `defaults.sort`.
    ///
    /// # Examples
    /// ```
    /// use quest_backend::domain::{ListingDefaults, QuestListQuery, QuestSort, RawQuestQuery};
    ///
    /// let raw = RawQuestQuery {
    ///     genre: Some("horror, ,mystic".into()),
    ///     fear_level: Some("lots".into()),
    ///     sort: Some("sideways".into()),
    ///     ..RawQuestQuery::default()
    /// };
    /// let query = QuestListQuery::parse(&raw, ListingDefaults::default());
    /// assert_eq!(query.filter.genres, vec!["horror", "mystic"]);
    /// assert_eq!(query.filter.min_fear_level, None);
    /// assert_eq!(query.sort, QuestSort::Newest);
    /// assert_eq!(query.page.limit(), 15);
    /// ```
    #[must_use]
    pub fn parse(raw: &RawQuestQuery, defaults: ListingDefaults) -> Self {
        let filter = QuestFilter {
            title_contains: non_blank(raw.q.as_deref()).map(str::to_owned),
            genres: split_list(raw.genre.as_deref(), str::to_lowercase),
            difficulties: split_list(raw.difficulty.as_deref(), str::to_owned),
            min_fear_level: parse_int(raw.fear_level.as_deref()),
            max_players: parse_int(raw.players.as_deref()),
        };
        let sort = non_blank(raw.sort.as_deref())
            .and_then(|key| key.parse().ok())
            .unwrap_or(defaults.sort);
        let skip = parse_int(raw.skip.as_deref()).unwrap_or(0);
        let limit = parse_int(raw.limit.as_deref()).unwrap_or(defaults.page_size);
        Self {
            filter,
            sort,
            page: PageRequest::clamped(skip, limit),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_int<T: FromStr>(value: Option<&str>) -> Option<T> {
    non_blank(value).and_then(|v| v.parse().ok())
}

fn split_list(value: Option<&str>, normalise: fn(&str) -> String) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for entry in value.unwrap_or_default().split(',').map(str::trim) {
        if entry.is_empty() {
            continue;
        }
        let entry = normalise(entry);
        if !items.contains(&entry) {
            items.push(entry);
        }
    }
    items
}
