//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{KbEntryId, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::canonical_url::EntryUrl;
use crate::domain::entry::KbEntry;
use crate::domain::repository::{EntryFilter, KbRepository};
use crate::error::{KbError, KbResult};

const SELECT_COLUMNS: &str = "SELECT id, user_id, title, url_original, url_canonical, tags, \
                              is_public, created_at, updated_at FROM kb_entries";

/// PostgreSQL-backed knowledge base repository
#[derive(Clone)]
pub struct PgKbRepository {
    pool: PgPool,
}

impl PgKbRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique `(user_id, url_canonical)` violations become `DuplicateUrl`
fn map_write_error(err: sqlx::Error) -> KbError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => KbError::DuplicateUrl,
        _ => KbError::Database(err),
    }
}

impl KbRepository for PgKbRepository {
    async fn list(&self, filter: &EntryFilter) -> KbResult<Vec<KbEntry>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_COLUMNS);

        qb.push(" WHERE (is_public");
        if let Some(viewer) = &filter.viewer {
            qb.push(" OR user_id = ").push_bind(*viewer.as_uuid());
        }
        qb.push(")");

        if let Some(cursor) = &filter.after {
            let ts = DateTime::<Utc>::from_timestamp_millis(cursor.updated_at_ms)
                .ok_or_else(|| KbError::Validation("Nieprawidłowy kursor stronicowania".into()))?;
            qb.push(" AND (updated_at, id) < (")
                .push_bind(ts)
                .push(", ")
                .push_bind(*cursor.id.as_uuid())
                .push(")");
        }

        if let Some(query) = &filter.query {
            let pattern = format!("%{}%", escape_like(query));
            qb.push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR url_original ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(tag) = &filter.tag {
            qb.push(" AND ")
                .push_bind(tag.clone())
                .push(" = ANY(tags)");
        }

        qb.push(" ORDER BY updated_at DESC, id DESC LIMIT ")
            .push_bind(filter.limit as i64);

        let rows = qb
            .build_query_as::<KbEntryRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(KbEntryRow::into_entry).collect())
    }

    async fn find(&self, id: &KbEntryId) -> KbResult<Option<KbEntry>> {
        let row = sqlx::query_as::<_, KbEntryRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(KbEntryRow::into_entry))
    }

    async fn insert(&self, entry: &KbEntry) -> KbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kb_entries
                (id, user_id, title, url_original, url_canonical, tags, is_public, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.user_id.as_uuid())
        .bind(&entry.title)
        .bind(entry.url.original())
        .bind(entry.url.canonical())
        .bind(&entry.tags)
        .bind(entry.is_public)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn update(&self, entry: &KbEntry) -> KbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE kb_entries
            SET title = $2, url_original = $3, url_canonical = $4, tags = $5,
                is_public = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(&entry.title)
        .bind(entry.url.original())
        .bind(entry.url.canonical())
        .bind(&entry.tags)
        .bind(entry.is_public)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(KbError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: &KbEntryId) -> KbResult<bool> {
        let result = sqlx::query("DELETE FROM kb_entries WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct KbEntryRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    url_original: String,
    url_canonical: String,
    tags: Vec<String>,
    is_public: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl KbEntryRow {
    fn into_entry(self) -> KbEntry {
        KbEntry {
            id: KbEntryId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            title: self.title,
            url: EntryUrl::from_parts(self.url_original, self.url_canonical),
            tags: self.tags,
            is_public: self.is_public,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
