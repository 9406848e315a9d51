//! Driving port for browsing quests.

use async_trait::async_trait;
use pagination::Page;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, Quest, QuestId, QuestListQuery};

/// A quest with the times already taken today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestDetail {
    #[serde(flatten)]
    pub quest: Quest,
    /// `HH:MM` labels booked for today, ascending.
    #[schema(example = json!(["12:00", "18:00"]))]
    pub booked_slots: Vec<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestCatalogue: Send + Sync {
    async fn list_quests(&self, query: &QuestListQuery) -> Result<Page<Quest>, Error>;

    /// The quest, or `NotFound`.
    async fn get_quest(&self, id: QuestId) -> Result<Quest, Error>;

    /// The quest plus today's booked times, or `NotFound`.
    async fn quest_detail(&self, id: QuestId) -> Result<QuestDetail, Error>;
}
