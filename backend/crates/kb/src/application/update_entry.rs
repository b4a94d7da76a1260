//! Update Entry Use Case

use std::sync::Arc;

use kernel::id::KbEntryId;
use kernel::principal::Viewer;

use crate::application::config::KbConfig;
use crate::application::create_entry::EntryInput;
use crate::application::require_principal;
use crate::domain::entry::KbEntry;
use crate::domain::repository::KbRepository;
use crate::error::{KbError, KbResult};

pub struct UpdateEntryUseCase<R: KbRepository> {
    repo: Arc<R>,
    config: Arc<KbConfig>,
}

impl<R: KbRepository> UpdateEntryUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<KbConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        viewer: &Viewer,
        id: &KbEntryId,
        input: EntryInput,
    ) -> KbResult<KbEntry> {
        let principal = require_principal(viewer)?;

        let mut entry = self
            .repo
            .find(id)
            .await?
            .filter(|entry| principal.can_manage(&entry.user_id))
            .ok_or(KbError::NotFound)?;

        let draft = input
            .into_draft(self.config.max_tags)
            .map_err(KbError::Validation)?;
        entry.apply(draft);

        self.repo.update(&entry).await?;

        tracing::info!(entry_id = %entry.id, user_id = %principal.user_id, "KB entry updated");

        Ok(entry)
    }
}
