//! Get Entry Use Case

use std::sync::Arc;

use kernel::id::KbEntryId;
use kernel::principal::Viewer;

use crate::domain::entry::KbEntry;
use crate::domain::repository::KbRepository;
use crate::error::{KbError, KbResult};

pub struct GetEntryUseCase<R: KbRepository> {
    repo: Arc<R>,
}

impl<R: KbRepository> GetEntryUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Private entries of other users are reported as missing
    pub async fn execute(&self, viewer: &Viewer, id: &KbEntryId) -> KbResult<KbEntry> {
        self.repo
            .find(id)
            .await?
            .filter(|entry| entry.is_visible_to(viewer))
            .ok_or(KbError::NotFound)
    }
}
