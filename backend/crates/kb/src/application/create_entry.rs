//! Create Entry Use Case

use std::sync::Arc;

use kernel::principal::Viewer;

use crate::application::config::KbConfig;
use crate::application::require_principal;
use crate::domain::entry::{EntryDraft, KbEntry};
use crate::domain::repository::KbRepository;
use crate::error::{KbError, KbResult};

pub struct CreateEntryUseCase<R: KbRepository> {
    repo: Arc<R>,
    config: Arc<KbConfig>,
}

impl<R: KbRepository> CreateEntryUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<KbConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, viewer: &Viewer, input: EntryInput) -> KbResult<KbEntry> {
        let principal = require_principal(viewer)?;

        let draft = input
            .into_draft(self.config.max_tags)
            .map_err(KbError::Validation)?;
        let entry = KbEntry::new(principal.user_id, draft);

        self.repo.insert(&entry).await?;

        tracing::info!(entry_id = %entry.id, user_id = %principal.user_id, "KB entry created");

        Ok(entry)
    }
}

/// User-editable fields of an entry, as received
#[derive(Debug, Clone, Default)]
pub struct EntryInput {
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
    pub is_public: bool,
}

impl EntryInput {
    pub(crate) fn into_draft(self, max_tags: usize) -> Result<EntryDraft, String> {
        EntryDraft::new(
            &self.title,
            &self.url,
            &self.tags,
            self.is_public,
            max_tags,
        )
    }
}
