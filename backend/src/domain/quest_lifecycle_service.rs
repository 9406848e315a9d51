//! Admin quest management implementing [`QuestAdministration`].
//!
//! Image files are stored before the row changes and removed once the row
//! no longer references them. Failing to remove a file only logs.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use super::ports::{
    BookingRepository, ImageStore, QuestAdministration, QuestRepository, QuestRepositoryError,
};
use super::{
    BookingDetails, BookingScope, Error, ImageUpload, Quest, QuestDraft, QuestId, port_errors,
};

#[derive(Clone)]
pub struct QuestLifecycleService<Q, B, I> {
    quests: Arc<Q>,
    bookings: Arc<B>,
    images: Arc<I>,
}

impl<Q, B, I> QuestLifecycleService<Q, B, I> {
    pub fn new(quests: Arc<Q>, bookings: Arc<B>, images: Arc<I>) -> Self {
        Self {
            quests,
            bookings,
            images,
        }
    }
}

fn not_found(id: QuestId) -> Error {
    Error::not_found(format!("quest {id} not found"))
}

fn blocked_by(bookings: &[BookingDetails]) -> Error {
    // At least one booking blocked the delete, even if a re-read finds none.
    let count = u64::try_from(bookings.len()).unwrap_or(u64::MAX).max(1);
    let blocking: Vec<_> = bookings
        .iter()
        .map(|booking| {
            json!({
                "id": booking.id,
                "dateTime": booking.slot,
                "username": booking.username,
            })
        })
        .collect();
    Error::has_active_bookings(count).with_details(json!({
        "bookingCount": count,
        "bookings": blocking,
    }))
}

impl<Q, B, I> QuestLifecycleService<Q, B, I>
where
    Q: QuestRepository,
    B: BookingRepository,
    I: ImageStore,
{
    async fn existing(&self, id: QuestId) -> Result<Quest, Error> {
        self.quests
            .find_by_id(id)
            .await
            .map_err(port_errors::quest_store)?
            .ok_or_else(|| not_found(id))
    }

    async fn blocking_bookings(&self, id: QuestId) -> Result<Vec<BookingDetails>, Error> {
        self.bookings
            .list_details(BookingScope::Quest(id))
            .await
            .map_err(port_errors::booking_store)
    }

    async fn store_image(&self, image: Option<&ImageUpload>) -> Result<Option<String>, Error> {
        match image {
            Some(upload) => self
                .images
                .save(upload)
                .await
                .map(Some)
                .map_err(port_errors::image_store),
            None => Ok(None),
        }
    }

    async fn discard_image(&self, path: Option<&str>) {
        let Some(path) = path else {
            return;
        };
        if let Err(err) = self.images.remove(path).await {
            warn!(path, error = %err, "failed to remove quest image");
        }
    }
}

#[async_trait]
impl<Q, B, I> QuestAdministration for QuestLifecycleService<Q, B, I>
where
    Q: QuestRepository,
    B: BookingRepository,
    I: ImageStore,
{
    async fn create(&self, draft: QuestDraft, image: Option<ImageUpload>) -> Result<Quest, Error> {
        let image_path = self.store_image(image.as_ref()).await?;
        match self.quests.insert(&draft, image_path.clone()).await {
            Ok(quest) => {
                info!(quest_id = %quest.id, title = %quest.title, "quest created");
                Ok(quest)
            }
            Err(err) => {
                self.discard_image(image_path.as_deref()).await;
                Err(port_errors::quest_store(err))
            }
        }
    }

    async fn update(
        &self,
        id: QuestId,
        draft: QuestDraft,
        image: Option<ImageUpload>,
    ) -> Result<Quest, Error> {
        let current = self.existing(id).await?;
        let new_path = self.store_image(image.as_ref()).await?;
        let path = new_path.clone().or_else(|| current.image_path.clone());

        match self.quests.update(id, &draft, path).await {
            Ok(Some(quest)) => {
                if new_path.is_some() && current.image_path != new_path {
                    self.discard_image(current.image_path.as_deref()).await;
                }
                info!(quest_id = %id, "quest updated");
                Ok(quest)
            }
            Ok(None) => {
                self.discard_image(new_path.as_deref()).await;
                Err(not_found(id))
            }
            Err(err) => {
                self.discard_image(new_path.as_deref()).await;
                Err(port_errors::quest_store(err))
            }
        }
    }

    async fn delete(&self, id: QuestId) -> Result<(), Error> {
        let quest = self.existing(id).await?;
        let blocking = self.blocking_bookings(id).await?;
        if !blocking.is_empty() {
            return Err(blocked_by(&blocking));
        }

        match self.quests.delete(id).await {
            Ok(true) => {
                self.discard_image(quest.image_path.as_deref()).await;
                info!(quest_id = %id, "quest deleted");
                Ok(())
            }
            Ok(false) => Err(not_found(id)),
            Err(QuestRepositoryError::QuestHasBookings { .. }) => {
                // A booking arrived between the check and the delete.
                let blocking = self.blocking_bookings(id).await?;
                Err(blocked_by(&blocking))
            }
            Err(err) => Err(port_errors::quest_store(err)),
        }
    }

    async fn delete_with_bookings(&self, id: QuestId) -> Result<u64, Error> {
        let quest = self.existing(id).await?;
        let removed = self
            .quests
            .delete_with_bookings(id)
            .await
            .map_err(port_errors::quest_store)?
            .ok_or_else(|| not_found(id))?;
        self.discard_image(quest.image_path.as_deref()).await;
        info!(quest_id = %id, bookings_removed = removed, "quest deleted with bookings");
        Ok(removed)
    }

    async fn delete_bookings(&self, id: QuestId) -> Result<u64, Error> {
        self.existing(id).await?;
        let removed = self
            .bookings
            .delete_for_quest(id)
            .await
            .map_err(port_errors::booking_store)?;
        info!(quest_id = %id, bookings_removed = removed, "quest bookings deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests;
