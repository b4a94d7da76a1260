//! List Charters Use Case

use std::sync::Arc;

use kernel::principal::Viewer;

use crate::application::require_principal;
use crate::domain::charter::{Charter, CharterStatus};
use crate::domain::repository::CharterRepository;
use crate::error::{CharterError, CharterResult};

pub struct ListChartersUseCase<R: CharterRepository> {
    repo: Arc<R>,
}

impl<R: CharterRepository> ListChartersUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, viewer: &Viewer, status: Option<&str>) -> CharterResult<Vec<Charter>> {
        let principal = require_principal(viewer)?;

        let status = match status.filter(|s| !s.is_empty()) {
            Some(code) => Some(CharterStatus::from_code(code).ok_or_else(|| {
                CharterError::Validation(
                    "Parametr status musi mieć wartość active lub closed".to_string(),
                )
            })?),
            None => None,
        };

        self.repo.list(&principal.user_id, status).await
    }
}
