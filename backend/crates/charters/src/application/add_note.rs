//! Add Note Use Case

use std::sync::Arc;

use kernel::id::CharterId;
use kernel::principal::Viewer;

use crate::application::{find_owned, require_principal};
use crate::domain::note::{CharterNote, NoteLabel};
use crate::domain::repository::CharterRepository;
use crate::error::{CharterError, CharterResult};

#[derive(Debug, Clone)]
pub struct AddNoteInput {
    pub label: NoteLabel,
    pub body: String,
}

pub struct AddNoteUseCase<R: CharterRepository> {
    repo: Arc<R>,
}

impl<R: CharterRepository> AddNoteUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        viewer: &Viewer,
        charter_id: &CharterId,
        input: AddNoteInput,
    ) -> CharterResult<CharterNote> {
        let principal = require_principal(viewer)?;
        let charter = find_owned(self.repo.as_ref(), principal, charter_id).await?;

        if !charter.is_active() {
            return Err(CharterError::Closed);
        }

        let note = CharterNote::new(charter.id, input.label, &input.body)
            .map_err(CharterError::Validation)?;

        if !self.repo.add_note(&note).await? {
            return Err(CharterError::Closed);
        }

        tracing::debug!(charter_id = %charter.id, label = note.label.code(), "Charter note added");

        Ok(note)
    }
}
