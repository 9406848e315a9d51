//! PostgreSQL-backed `QuestRepository`.
//!
//! Listing composes one boxed query from the active filters: a
//! case-insensitive title match, genre containment (`@>`, so every
//! requested genre must be present), difficulty membership and the two
//! numeric bounds. Every sort key gets an `id` tiebreak in the same
//! direction so pages never overlap.

use async_trait::async_trait;
use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::Page;
use tracing::warn;

use crate::domain::ports::{QuestRepository, QuestRepositoryError};
use crate::domain::{Quest, QuestDraft, QuestFilter, QuestId, QuestListQuery, QuestSort};

use super::diesel_error::{DbFailure, classify};
use super::models::{InvalidRow, QuestRow, QuestWriteRow, row_count};
use super::pool::{DbPool, PoolError};
use super::schema::{bookings, quests};

const BOOKINGS_QUEST_FK: &str = "bookings_quest_id_fkey";

type BoxedQuestQuery<'a> = quests::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<QuestRow, Pg>>>;

/// Diesel implementation of [`QuestRepository`].
#[derive(Clone)]
pub struct DieselQuestRepository {
    pool: DbPool,
}

impl DieselQuestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> QuestRepositoryError {
    QuestRepositoryError::connection(error.into_message())
}

fn map_failure(failure: DbFailure) -> QuestRepositoryError {
    match failure {
        DbFailure::Connection(message) => QuestRepositoryError::connection(message),
        DbFailure::Query(message) => QuestRepositoryError::query(message),
        DbFailure::UniqueViolation { .. } | DbFailure::ForeignKeyViolation { .. } => {
            QuestRepositoryError::query("constraint violation")
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> QuestRepositoryError {
    map_failure(classify(error))
}

fn map_invalid_row(error: InvalidRow) -> QuestRepositoryError {
    warn!(%error, "discarding unreadable quest row");
    QuestRepositoryError::query(error.to_string())
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn apply_filter<'a>(mut statement: BoxedQuestQuery<'a>, filter: &QuestFilter) -> BoxedQuestQuery<'a> {
    if let Some(needle) = &filter.title_contains {
        statement = statement.filter(quests::title.ilike(format!("%{}%", escape_like(needle))));
    }
    if !filter.genres.is_empty() {
        let tags: Vec<String> = filter.genres.iter().map(|tag| tag.to_lowercase()).collect();
        statement = statement.filter(quests::genres.contains(tags));
    }
    if !filter.difficulties.is_empty() {
        statement = statement.filter(quests::difficulty.eq_any(filter.difficulties.clone()));
    }
    if let Some(min_fear) = filter.min_fear_level {
        statement = statement.filter(quests::fear_level.ge(min_fear));
    }
    if let Some(max_players) = filter.max_players {
        statement = statement.filter(quests::players.le(max_players));
    }
    statement
}

fn apply_sort(statement: BoxedQuestQuery<'_>, sort: QuestSort) -> BoxedQuestQuery<'_> {
    let ordered = match sort {
        QuestSort::TitleAsc => statement.order_by(quests::title.asc()),
        QuestSort::TitleDesc => statement.order_by(quests::title.desc()),
        QuestSort::Newest => statement.order_by(quests::created_at.desc()),
        QuestSort::Oldest => statement.order_by(quests::created_at.asc()),
        QuestSort::PriceLow => statement.order_by(quests::price.asc()),
        QuestSort::PriceHigh => statement.order_by(quests::price.desc()),
    };
    if sort.is_descending() {
        ordered.then_order_by(quests::id.desc())
    } else {
        ordered.then_order_by(quests::id.asc())
    }
}

fn into_quests(rows: Vec<QuestRow>) -> Result<Vec<Quest>, QuestRepositoryError> {
    rows.into_iter()
        .map(|row| Quest::try_from(row).map_err(map_invalid_row))
        .collect()
}

#[async_trait]
impl QuestRepository for DieselQuestRepository {
    async fn list(&self, query: &QuestListQuery) -> Result<Page<Quest>, QuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let statement = quests::table.select(QuestRow::as_select()).into_boxed();
        let statement = apply_sort(apply_filter(statement, &query.filter), query.sort);
        let rows = statement
            .offset(query.page.offset())
            .limit(query.page.fetch_limit())
            .load::<QuestRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(Page::from_overfetch(into_quests(rows)?, query.page))
    }

    async fn find_by_id(&self, id: QuestId) -> Result<Option<Quest>, QuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = quests::table
            .find(id.get())
            .select(QuestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Quest::try_from).transpose().map_err(map_invalid_row)
    }

    async fn insert(
        &self,
        draft: &QuestDraft,
        image_path: Option<String>,
    ) -> Result<Quest, QuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let values = QuestWriteRow::new(draft, image_path.as_deref());
        let row = diesel::insert_into(quests::table)
            .values(&values)
            .returning(QuestRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Quest::try_from(row).map_err(map_invalid_row)
    }

    async fn update(
        &self,
        id: QuestId,
        draft: &QuestDraft,
        image_path: Option<String>,
    ) -> Result<Option<Quest>, QuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = QuestWriteRow::new(draft, image_path.as_deref());
        let row = diesel::update(quests::table.find(id.get()))
            .set(&changes)
            .returning(QuestRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Quest::try_from).transpose().map_err(map_invalid_row)
    }

    async fn delete(&self, id: QuestId) -> Result<bool, QuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(quests::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| match classify(err) {
                failure if failure.violates(BOOKINGS_QUEST_FK) => {
                    QuestRepositoryError::quest_has_bookings(id.get())
                }
                failure => map_failure(failure),
            })?;
        Ok(deleted > 0)
    }

    async fn delete_with_bookings(
        &self,
        id: QuestId,
    ) -> Result<Option<u64>, QuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let quest_id = id.get();
        let removed = conn
            .transaction(|conn| {
                async move {
                    // Row lock blocks concurrent bookings until commit.
                    let locked = quests::table
                        .find(quest_id)
                        .select(quests::id)
                        .for_update()
                        .get_result::<i64>(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Ok(None);
                    }
                    let removed =
                        diesel::delete(bookings::table.filter(bookings::quest_id.eq(quest_id)))
                            .execute(conn)
                            .await?;
                    diesel::delete(quests::table.find(quest_id))
                        .execute(conn)
                        .await?;
                    Ok(Some(removed))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(removed.map(row_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::diesel_error::test_errors::database_error;
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case("manor", "manor")]
    #[case("100%", "100\\%")]
    #[case("a_b", "a\\_b")]
    #[case("back\\slash", "back\\\\slash")]
    fn escape_like_neutralises_wildcards(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_like(raw), expected);
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, QuestRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let err = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection, None));
        assert!(matches!(err, QuestRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn stray_constraint_violation_is_a_query_error() {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some(BOOKINGS_QUEST_FK),
        ));
        assert_eq!(err, QuestRepositoryError::query("constraint violation"));
    }
}
