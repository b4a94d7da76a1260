//! Start Charter Use Case

use std::sync::Arc;

use kernel::principal::Viewer;

use crate::application::require_principal;
use crate::domain::charter::Charter;
use crate::domain::repository::CharterRepository;
use crate::error::{CharterError, CharterResult};

#[derive(Debug, Clone, Default)]
pub struct StartCharterInput {
    pub goal: String,
    pub hypotheses: Option<String>,
}

pub struct StartCharterUseCase<R: CharterRepository> {
    repo: Arc<R>,
}

impl<R: CharterRepository> StartCharterUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, viewer: &Viewer, input: StartCharterInput) -> CharterResult<Charter> {
        let principal = require_principal(viewer)?;

        let charter = Charter::start(principal.user_id, &input.goal, input.hypotheses.as_deref())
            .map_err(CharterError::Validation)?;

        self.repo.insert(&charter).await?;

        tracing::info!(charter_id = %charter.id, user_id = %principal.user_id, "Charter started");

        Ok(charter)
    }
}
