//! KB DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::EntryInput;
use crate::domain::entry::KbEntry;
use crate::error::KbError;

/// Server-managed fields a client may never send
pub const FORBIDDEN_FIELDS: &[&str] = &[
    "id",
    "userId",
    "user_id",
    "createdAt",
    "created_at",
    "updatedAt",
    "updated_at",
    "urlCanonical",
    "url_canonical",
];

const ALLOWED_FIELDS: &[&str] = &["title", "url", "tags", "isPublic"];

/// `POST` / `PUT` body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EntryRequest {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
}

impl EntryRequest {
    /// Checks forbidden and unknown fields before deserializing, so the
    /// client learns which field was rejected
    pub fn from_value(body: Value) -> Result<Self, KbError> {
        let Value::Object(map) = &body else {
            return Err(KbError::Validation(
                "Treść żądania musi być obiektem JSON".to_string(),
            ));
        };

        if let Some(field) = map.keys().find(|k| FORBIDDEN_FIELDS.contains(&k.as_str())) {
            return Err(KbError::ForbiddenField(field.clone()));
        }

        if let Some(field) = map.keys().find(|k| !ALLOWED_FIELDS.contains(&k.as_str())) {
            return Err(KbError::Validation(format!("Nieznane pole: {field}")));
        }

        serde_json::from_value(body).map_err(|e| {
            tracing::debug!(error = %e, "Malformed KB entry body");
            KbError::Validation("Nieprawidłowe dane wejściowe".to_string())
        })
    }
}

impl From<EntryRequest> for EntryInput {
    fn from(req: EntryRequest) -> Self {
        Self {
            title: req.title,
            url: req.url,
            tags: req.tags,
            is_public: req.is_public,
        }
    }
}

/// `GET /entries` query
#[derive(Debug, Default, Deserialize)]
pub struct ListEntriesQuery {
    pub limit: Option<i64>,
    pub after: Option<String>,
    pub q: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub url_canonical: String,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&KbEntry> for EntryResponse {
    fn from(entry: &KbEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            user_id: entry.user_id.to_string(),
            title: entry.title.clone(),
            url: entry.url.original().to_string(),
            url_canonical: entry.url.canonical().to_string(),
            tags: entry.tags.clone(),
            is_public: entry.is_public,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesResponse {
    pub items: Vec<EntryResponse>,
    pub next_cursor: Option<String>,
}
