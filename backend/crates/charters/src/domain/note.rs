//! Charter notes

use chrono::{DateTime, Utc};
use kernel::id::{CharterId, CharterNoteId};
use serde::{Deserialize, Serialize};

pub const NOTE_BODY_MAX_LENGTH: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteLabel {
    Bug,
    Idea,
    Question,
    Risk,
}

impl NoteLabel {
    pub const fn code(&self) -> &'static str {
        match self {
            NoteLabel::Bug => "bug",
            NoteLabel::Idea => "idea",
            NoteLabel::Question => "question",
            NoteLabel::Risk => "risk",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "bug" => Some(NoteLabel::Bug),
            "idea" => Some(NoteLabel::Idea),
            "question" => Some(NoteLabel::Question),
            "risk" => Some(NoteLabel::Risk),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharterNote {
    pub id: CharterNoteId,
    pub charter_id: CharterId,
    pub label: NoteLabel,
    pub body: String,
    pub noted_at: DateTime<Utc>,
}

impl CharterNote {
    pub fn new(charter_id: CharterId, label: NoteLabel, body: &str) -> Result<Self, String> {
        let body = body.trim();
        let len = body.chars().count();
        if len == 0 || len > NOTE_BODY_MAX_LENGTH {
            return Err(format!(
                "Treść notatki musi mieć od 1 do {NOTE_BODY_MAX_LENGTH} znaków"
            ));
        }

        Ok(Self {
            id: CharterNoteId::new(),
            charter_id,
            label,
            body: body.to_string(),
            noted_at: Utc::now(),
        })
    }
}
