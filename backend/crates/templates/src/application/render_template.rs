//! Render Template Use Case

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::DefectTemplateId;
use kernel::principal::Viewer;

use crate::application::GetTemplateUseCase;
use crate::domain::render::render;
use crate::domain::repository::TemplateRepository;
use crate::error::TemplateResult;

pub struct RenderTemplateUseCase<R: TemplateRepository> {
    repo: Arc<R>,
}

impl<R: TemplateRepository> RenderTemplateUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Markdown for the template filled with `values`
    pub async fn execute(
        &self,
        viewer: &Viewer,
        id: &DefectTemplateId,
        values: &HashMap<String, String>,
    ) -> TemplateResult<String> {
        let template = GetTemplateUseCase::new(self.repo.clone())
            .execute(viewer, id)
            .await?;
        Ok(render(&template, values)?)
    }
}
