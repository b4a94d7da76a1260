//! Charter DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::CharterWithNotes;
use crate::domain::charter::{Charter, CharterStatus};
use crate::domain::note::{CharterNote, NoteLabel};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartCharterRequest {
    pub goal: String,
    #[serde(default)]
    pub hypotheses: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddNoteRequest {
    pub label: NoteLabel,
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListChartersQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharterResponse {
    pub id: String,
    pub goal: String,
    pub hypotheses: Option<String>,
    pub status: CharterStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_secs: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<&Charter> for CharterResponse {
    fn from(charter: &Charter) -> Self {
        Self {
            id: charter.id.to_string(),
            goal: charter.goal.clone(),
            hypotheses: charter.hypotheses.clone(),
            status: charter.status,
            started_at: charter.started_at,
            ended_at: charter.ended_at,
            duration_secs: charter.duration_secs(Utc::now()),
            updated_at: charter.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: String,
    pub label: NoteLabel,
    pub body: String,
    pub noted_at: DateTime<Utc>,
}

impl From<&CharterNote> for NoteResponse {
    fn from(note: &CharterNote) -> Self {
        Self {
            id: note.id.to_string(),
            label: note.label,
            body: note.body.clone(),
            noted_at: note.noted_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CharterDetailResponse {
    #[serde(flatten)]
    pub charter: CharterResponse,
    pub notes: Vec<NoteResponse>,
}

impl From<&CharterWithNotes> for CharterDetailResponse {
    fn from(detail: &CharterWithNotes) -> Self {
        Self {
            charter: CharterResponse::from(&detail.charter),
            notes: detail.notes.iter().map(NoteResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListChartersResponse {
    pub items: Vec<CharterResponse>,
}
