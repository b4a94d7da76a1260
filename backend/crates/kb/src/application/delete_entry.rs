//! Delete Entry Use Case

use std::sync::Arc;

use kernel::id::KbEntryId;
use kernel::principal::Viewer;

use crate::application::require_principal;
use crate::domain::repository::KbRepository;
use crate::error::{KbError, KbResult};

pub struct DeleteEntryUseCase<R: KbRepository> {
    repo: Arc<R>,
}

impl<R: KbRepository> DeleteEntryUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, viewer: &Viewer, id: &KbEntryId) -> KbResult<()> {
        let principal = require_principal(viewer)?;

        let entry = self
            .repo
            .find(id)
            .await?
            .filter(|entry| principal.can_manage(&entry.user_id))
            .ok_or(KbError::NotFound)?;

        if !self.repo.delete(&entry.id).await? {
            return Err(KbError::NotFound);
        }

        tracing::info!(entry_id = %entry.id, user_id = %principal.user_id, "KB entry deleted");

        Ok(())
    }
}
