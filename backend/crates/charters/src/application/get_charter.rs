//! Get Charter Use Case

use std::sync::Arc;

use kernel::id::CharterId;
use kernel::principal::Viewer;

use crate::application::{find_owned, require_principal};
use crate::domain::charter::Charter;
use crate::domain::note::CharterNote;
use crate::domain::repository::CharterRepository;
use crate::error::CharterResult;

#[derive(Debug, Clone)]
pub struct CharterWithNotes {
    pub charter: Charter,
    pub notes: Vec<CharterNote>,
}

pub struct GetCharterUseCase<R: CharterRepository> {
    repo: Arc<R>,
}

impl<R: CharterRepository> GetCharterUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, viewer: &Viewer, id: &CharterId) -> CharterResult<CharterWithNotes> {
        let principal = require_principal(viewer)?;
        let charter = find_owned(self.repo.as_ref(), principal, id).await?;
        let notes = self.repo.notes(&charter.id).await?;
        Ok(CharterWithNotes { charter, notes })
    }
}
