//! PostgreSQL Repository Implementation
//!
//! "One active charter per user" is enforced by the partial unique index
//! `charters_one_active_per_user`.

use chrono::{DateTime, Utc};
use kernel::id::{CharterId, CharterNoteId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::charter::{Charter, CharterStatus};
use crate::domain::note::{CharterNote, NoteLabel};
use crate::domain::repository::CharterRepository;
use crate::error::{CharterError, CharterResult};

#[derive(Clone)]
pub struct PgCharterRepository {
    pool: PgPool,
}

impl PgCharterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CharterRepository for PgCharterRepository {
    async fn list(
        &self,
        user_id: &UserId,
        status: Option<CharterStatus>,
    ) -> CharterResult<Vec<Charter>> {
        let rows = sqlx::query_as::<_, CharterRow>(
            r#"
            SELECT id, user_id, goal, hypotheses, status, started_at, ended_at,
                   created_at, updated_at
            FROM charters
            WHERE user_id = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY started_at DESC, id DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(status.map(|s| s.code()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CharterRow::into_charter).collect()
    }

    async fn find(&self, id: &CharterId) -> CharterResult<Option<Charter>> {
        let row = sqlx::query_as::<_, CharterRow>(
            r#"
            SELECT id, user_id, goal, hypotheses, status, started_at, ended_at,
                   created_at, updated_at
            FROM charters
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CharterRow::into_charter).transpose()
    }

    async fn insert(&self, charter: &Charter) -> CharterResult<()> {
        sqlx::query(
            r#"
            INSERT INTO charters
                (id, user_id, goal, hypotheses, status, started_at, ended_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(charter.id.as_uuid())
        .bind(charter.user_id.as_uuid())
        .bind(&charter.goal)
        .bind(&charter.hypotheses)
        .bind(charter.status.code())
        .bind(charter.started_at)
        .bind(charter.ended_at)
        .bind(charter.created_at)
        .bind(charter.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => CharterError::ActiveExists,
            _ => CharterError::Database(e),
        })?;

        Ok(())
    }

    async fn close(&self, id: &CharterId, ended_at: DateTime<Utc>) -> CharterResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE charters
            SET status = 'closed', ended_at = $2, updated_at = $2
            WHERE id = $1 AND status = 'active'
            "#,
        )
        .bind(id.as_uuid())
        .bind(ended_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn add_note(&self, note: &CharterNote) -> CharterResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO charter_notes (id, charter_id, label, body, noted_at)
            SELECT $1, $2, $3, $4, $5
            WHERE EXISTS (SELECT 1 FROM charters WHERE id = $2 AND status = 'active')
            "#,
        )
        .bind(note.id.as_uuid())
        .bind(note.charter_id.as_uuid())
        .bind(note.label.code())
        .bind(&note.body)
        .bind(note.noted_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn notes(&self, charter_id: &CharterId) -> CharterResult<Vec<CharterNote>> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, charter_id, label, body, noted_at
            FROM charter_notes
            WHERE charter_id = $1
            ORDER BY noted_at ASC, id ASC
            "#,
        )
        .bind(charter_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(NoteRow::into_note).collect()
    }

    async fn delete(&self, id: &CharterId) -> CharterResult<bool> {
        let result = sqlx::query("DELETE FROM charters WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CharterRow {
    id: Uuid,
    user_id: Uuid,
    goal: String,
    hypotheses: Option<String>,
    status: String,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CharterRow {
    fn into_charter(self) -> CharterResult<Charter> {
        let status = CharterStatus::from_code(&self.status).ok_or_else(|| {
            CharterError::Internal(format!("unknown charter status: {}", self.status))
        })?;

        Ok(Charter {
            id: CharterId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            goal: self.goal,
            hypotheses: self.hypotheses,
            status,
            started_at: self.started_at,
            ended_at: self.ended_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct NoteRow {
    id: Uuid,
    charter_id: Uuid,
    label: String,
    body: String,
    noted_at: DateTime<Utc>,
}

impl NoteRow {
    fn into_note(self) -> CharterResult<CharterNote> {
        let label = NoteLabel::from_code(&self.label).ok_or_else(|| {
            CharterError::Internal(format!("unknown note label: {}", self.label))
        })?;

        Ok(CharterNote {
            id: CharterNoteId::from_uuid(self.id),
            charter_id: CharterId::from_uuid(self.charter_id),
            label,
            body: self.body,
            noted_at: self.noted_at,
        })
    }
}
