//! Delete Charter Use Case

use std::sync::Arc;

use kernel::id::CharterId;
use kernel::principal::Viewer;

use crate::application::{find_owned, require_principal};
use crate::domain::repository::CharterRepository;
use crate::error::{CharterError, CharterResult};

pub struct DeleteCharterUseCase<R: CharterRepository> {
    repo: Arc<R>,
}

impl<R: CharterRepository> DeleteCharterUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Notes go with the charter
    pub async fn execute(&self, viewer: &Viewer, id: &CharterId) -> CharterResult<()> {
        let principal = require_principal(viewer)?;
        let charter = find_owned(self.repo.as_ref(), principal, id).await?;

        if !self.repo.delete(&charter.id).await? {
            return Err(CharterError::NotFound);
        }

        tracing::info!(charter_id = %charter.id, "Charter deleted");
        Ok(())
    }
}
