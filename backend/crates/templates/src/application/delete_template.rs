//! Delete Template Use Case

use std::sync::Arc;

use kernel::id::DefectTemplateId;
use kernel::principal::Viewer;

use crate::application::require_principal;
use crate::domain::repository::TemplateRepository;
use crate::error::{TemplateError, TemplateResult};

pub struct DeleteTemplateUseCase<R: TemplateRepository> {
    repo: Arc<R>,
}

impl<R: TemplateRepository> DeleteTemplateUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, viewer: &Viewer, id: &DefectTemplateId) -> TemplateResult<()> {
        let principal = require_principal(viewer)?;

        let template = self
            .repo
            .find(id)
            .await?
            .filter(|t| t.can_delete(principal))
            .ok_or(TemplateError::NotFound)?;

        if !self.repo.delete(&template.id).await? {
            return Err(TemplateError::NotFound);
        }

        tracing::info!(template_id = %template.id, user_id = %principal.user_id, "Defect template deleted");
        Ok(())
    }
}
