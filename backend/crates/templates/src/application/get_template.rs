//! Get Template Use Case

use std::sync::Arc;

use kernel::id::DefectTemplateId;
use kernel::principal::Viewer;

use crate::domain::repository::TemplateRepository;
use crate::domain::template::DefectTemplate;
use crate::error::{TemplateError, TemplateResult};

pub struct GetTemplateUseCase<R: TemplateRepository> {
    repo: Arc<R>,
}

impl<R: TemplateRepository> GetTemplateUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        viewer: &Viewer,
        id: &DefectTemplateId,
    ) -> TemplateResult<DefectTemplate> {
        self.repo
            .find(id)
            .await?
            .filter(|t| t.is_visible_to(viewer))
            .ok_or(TemplateError::NotFound)
    }
}
