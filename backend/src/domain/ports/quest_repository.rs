//! Driven port for quest storage.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Quest, QuestDraft, QuestId, QuestListQuery};

use super::define_port_error;

define_port_error! {
    /// Failures raised by quest repository adapters.
    pub enum QuestRepositoryError {
        Connection { message: String } => "quest repository connection failed: {message}",
        Query { message: String } => "quest repository query failed: {message}",
        /// A booking still references the quest.
        QuestHasBookings { quest_id: i64 } => "quest {quest_id} is referenced by bookings",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestRepository: Send + Sync {
    /// Filtered, sorted page of quests.
    async fn list(&self, query: &QuestListQuery) -> Result<Page<Quest>, QuestRepositoryError>;

    async fn find_by_id(&self, id: QuestId) -> Result<Option<Quest>, QuestRepositoryError>;

    async fn insert(
        &self,
        draft: &QuestDraft,
        image_path: Option<String>,
    ) -> Result<Quest, QuestRepositoryError>;

    /// Replace every attribute; `None` when the quest is missing.
    async fn update(
        &self,
        id: QuestId,
        draft: &QuestDraft,
        image_path: Option<String>,
    ) -> Result<Option<Quest>, QuestRepositoryError>;

    /// Delete a quest with no bookings. `false` when it was missing.
    async fn delete(&self, id: QuestId) -> Result<bool, QuestRepositoryError>;

    /// Delete the quest and all its bookings in one transaction.
    ///
    /// Returns the number of bookings removed, or `None` (and deletes
    /// nothing) when the quest is missing.
    async fn delete_with_bookings(&self, id: QuestId)
    -> Result<Option<u64>, QuestRepositoryError>;
}
