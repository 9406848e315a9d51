//! Quest browsing service implementing [`QuestCatalogue`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use pagination::Page;

use super::ports::{BookingRepository, QuestCatalogue, QuestDetail, QuestRepository};
use super::{Error, Quest, QuestId, QuestListQuery, Slot, port_errors};

/// Read side of the quest catalogue.
#[derive(Clone)]
pub struct QuestCatalogueService<Q, B> {
    quests: Arc<Q>,
    bookings: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<Q, B> QuestCatalogueService<Q, B> {
    pub fn new(quests: Arc<Q>, bookings: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self {
            quests,
            bookings,
            clock,
        }
    }
}

/// Sorted, de-duplicated `HH:MM` labels.
pub(crate) fn time_labels(slots: &[Slot]) -> Vec<String> {
    let mut labels: Vec<String> = slots.iter().map(Slot::time_label).collect();
    labels.sort_unstable();
    labels.dedup();
    labels
}

impl<Q, B> QuestCatalogueService<Q, B>
where
    Q: QuestRepository,
    B: BookingRepository,
{
    async fn booked_on(&self, id: QuestId, date: NaiveDate) -> Result<Vec<String>, Error> {
        let slots = self
            .bookings
            .booked_slots_on(id, date)
            .await
            .map_err(port_errors::booking_store)?;
        Ok(time_labels(&slots))
    }
}

#[async_trait]
impl<Q, B> QuestCatalogue for QuestCatalogueService<Q, B>
where
    Q: QuestRepository,
    B: BookingRepository,
{
    async fn list_quests(&self, query: &QuestListQuery) -> Result<Page<Quest>, Error> {
        self.quests
            .list(query)
            .await
            .map_err(port_errors::quest_store)
    }

    async fn get_quest(&self, id: QuestId) -> Result<Quest, Error> {
        self.quests
            .find_by_id(id)
            .await
            .map_err(port_errors::quest_store)?
            .ok_or_else(|| Error::not_found(format!("quest {id} not found")))
    }

    async fn quest_detail(&self, id: QuestId) -> Result<QuestDetail, Error> {
        let quest = self.get_quest(id).await?;
        let today = self.clock.local().date_naive();
        let booked_slots = self.booked_on(id, today).await?;
        Ok(QuestDetail {
            quest,
            booked_slots,
        })
    }
}
