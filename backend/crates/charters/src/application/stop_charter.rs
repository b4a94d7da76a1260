//! Stop Charter Use Case

use std::sync::Arc;

use chrono::Utc;
use kernel::id::CharterId;
use kernel::principal::Viewer;

use crate::application::{find_owned, require_principal};
use crate::domain::charter::{Charter, CharterStatus};
use crate::domain::repository::CharterRepository;
use crate::error::{CharterError, CharterResult};

pub struct StopCharterUseCase<R: CharterRepository> {
    repo: Arc<R>,
}

impl<R: CharterRepository> StopCharterUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, viewer: &Viewer, id: &CharterId) -> CharterResult<Charter> {
        let principal = require_principal(viewer)?;
        let mut charter = find_owned(self.repo.as_ref(), principal, id).await?;

        if !charter.is_active() {
            return Err(CharterError::Closed);
        }

        let ended_at = Utc::now();
        // Lost a race with a concurrent stop
        if !self.repo.close(&charter.id, ended_at).await? {
            return Err(CharterError::Closed);
        }

        charter.status = CharterStatus::Closed;
        charter.ended_at = Some(ended_at);
        charter.updated_at = ended_at;

        tracing::info!(
            charter_id = %charter.id,
            duration_secs = charter.duration_secs(ended_at),
            "Charter stopped"
        );

        Ok(charter)
    }
}
