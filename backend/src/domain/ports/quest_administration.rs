//! Driving port for admin quest management.

use async_trait::async_trait;

use crate::domain::{Error, ImageUpload, Quest, QuestDraft, QuestId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestAdministration: Send + Sync {
    async fn create(&self, draft: QuestDraft, image: Option<ImageUpload>) -> Result<Quest, Error>;

    /// Replace every attribute; keeps the current image unless one is given.
    async fn update(
        &self,
        id: QuestId,
        draft: QuestDraft,
        image: Option<ImageUpload>,
    ) -> Result<Quest, Error>;

    /// Guarded delete; fails with `HasActiveBookings` while bookings exist.
    async fn delete(&self, id: QuestId) -> Result<(), Error>;

    /// Delete the quest and its bookings atomically; returns bookings removed.
    async fn delete_with_bookings(&self, id: QuestId) -> Result<u64, Error>;

    /// Delete only the bookings; returns how many were removed.
    async fn delete_bookings(&self, id: QuestId) -> Result<u64, Error>;
}
