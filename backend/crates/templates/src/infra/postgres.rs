//! PostgreSQL Repository Implementation
//!
//! `fields` is stored as JSONB.

use chrono::{DateTime, Utc};
use kernel::id::{DefectTemplateId, UserId};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::repository::TemplateRepository;
use crate::domain::template::{DefectTemplate, TemplateField};
use crate::error::TemplateResult;

#[derive(Clone)]
pub struct PgTemplateRepository {
    pool: PgPool,
}

impl PgTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TemplateRepository for PgTemplateRepository {
    async fn list_visible(&self, owner: Option<&UserId>) -> TemplateResult<Vec<DefectTemplate>> {
        let rows = sqlx::query_as::<_, TemplateRow>(
            r#"
            SELECT id, owner_id, name, fields, body, created_at, updated_at
            FROM defect_templates
            WHERE owner_id IS NULL OR owner_id = $1
            ORDER BY (owner_id IS NOT NULL), name, id
            "#,
        )
        .bind(owner.map(|id| *id.as_uuid()))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TemplateRow::into_template).collect())
    }

    async fn find(&self, id: &DefectTemplateId) -> TemplateResult<Option<DefectTemplate>> {
        let row = sqlx::query_as::<_, TemplateRow>(
            r#"
            SELECT id, owner_id, name, fields, body, created_at, updated_at
            FROM defect_templates
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TemplateRow::into_template))
    }

    async fn insert(&self, template: &DefectTemplate) -> TemplateResult<()> {
        sqlx::query(
            r#"
            INSERT INTO defect_templates (id, owner_id, name, fields, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(template.id.as_uuid())
        .bind(template.owner_id.map(|id| *id.as_uuid()))
        .bind(&template.name)
        .bind(Json(&template.fields))
        .bind(&template.body)
        .bind(template.created_at)
        .bind(template.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &DefectTemplateId) -> TemplateResult<bool> {
        let result = sqlx::query("DELETE FROM defect_templates WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct TemplateRow {
    id: Uuid,
    owner_id: Option<Uuid>,
    name: String,
    fields: Json<Vec<TemplateField>>,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TemplateRow {
    fn into_template(self) -> DefectTemplate {
        DefectTemplate {
            id: DefectTemplateId::from_uuid(self.id),
            owner_id: self.owner_id.map(UserId::from_uuid),
            name: self.name,
            fields: self.fields.0,
            body: self.body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
