//! Postgres-backed [`NudgeStore`] implementation.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use nudge_core::nudge::{Nudge, NudgeDraft};
use nudge_core::schedule::{Schedule, TimeWindow};
use nudge_core::types::{NudgeId, Timestamp};
use sqlx::FromRow;
use uuid::Uuid;

use crate::store::{NudgeStore, StoreError};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tag, title, cover_image, schedule_date, start_time, end_time, \
     description, icon, invitation_text, created_at, updated_at";

/// A row from the `nudges` table. The nested wire shape is assembled in
/// the [`From`] conversion below.
#[derive(Debug, Clone, FromRow)]
struct NudgeRow {
    id: Uuid,
    tag: String,
    title: String,
    cover_image: String,
    schedule_date: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    description: String,
    icon: String,
    invitation_text: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl From<NudgeRow> for Nudge {
    fn from(row: NudgeRow) -> Self {
        Nudge {
            id: row.id,
            tag: row.tag,
            title: row.title,
            cover_image: row.cover_image,
            schedule: Schedule {
                date: row.schedule_date,
                time: TimeWindow {
                    start: row.start_time,
                    end: row.end_time,
                },
            },
            description: row.description,
            icon: row.icon,
            invitation_text: row.invitation_text,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// [`NudgeStore`] backed by the shared Postgres pool.
#[derive(Debug, Clone)]
pub struct PgNudgeStore {
    pool: DbPool,
}

impl PgNudgeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NudgeStore for PgNudgeStore {
    async fn insert(&self, draft: &NudgeDraft) -> Result<NudgeId, StoreError> {
        // v7 so ids sort by creation time, matching the listing order.
        let id = Uuid::now_v7();
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO nudges \
                 (id, tag, title, cover_image, schedule_date, start_time, end_time, \
                  description, icon, invitation_text) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING id",
        )
        .bind(id)
        .bind(&draft.tag)
        .bind(&draft.title)
        .bind(&draft.cover_image)
        .bind(draft.schedule.date)
        .bind(draft.schedule.time.start)
        .bind(draft.schedule.time.end)
        .bind(&draft.description)
        .bind(&draft.icon)
        .bind(&draft.invitation_text)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from)
    }

    async fn list(&self) -> Result<Vec<Nudge>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM nudges ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, NudgeRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Nudge::from).collect())
    }

    async fn find_by_id(&self, id: NudgeId) -> Result<Option<Nudge>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM nudges WHERE id = $1");
        let row = sqlx::query_as::<_, NudgeRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Nudge::from))
    }

    async fn replace(
        &self,
        id: NudgeId,
        draft: &NudgeDraft,
    ) -> Result<Option<Nudge>, StoreError> {
        // Single statement: absence and replacement cannot race, so a
        // miss here always means the record does not exist.
        let query = format!(
            "UPDATE nudges SET \
                tag = $2, title = $3, cover_image = $4, schedule_date = $5, \
                start_time = $6, end_time = $7, description = $8, icon = $9, \
                invitation_text = $10, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, NudgeRow>(&query)
            .bind(id)
            .bind(&draft.tag)
            .bind(&draft.title)
            .bind(&draft.cover_image)
            .bind(draft.schedule.date)
            .bind(draft.schedule.time.start)
            .bind(draft.schedule.time.end)
            .bind(&draft.description)
            .bind(&draft.icon)
            .bind(&draft.invitation_text)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Nudge::from))
    }

    async fn delete(&self, id: NudgeId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM nudges WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
