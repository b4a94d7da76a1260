//! Create Template Use Case

use std::sync::Arc;

use kernel::principal::Viewer;

use crate::application::require_principal;
use crate::domain::repository::TemplateRepository;
use crate::domain::template::{DefectTemplate, TemplateDraft, TemplateField};
use crate::error::{TemplateError, TemplateResult};

#[derive(Debug, Clone)]
pub struct CreateTemplateInput {
    pub name: String,
    pub fields: Vec<TemplateField>,
    pub body: String,
    pub global: bool,
}

pub struct CreateTemplateUseCase<R: TemplateRepository> {
    repo: Arc<R>,
}

impl<R: TemplateRepository> CreateTemplateUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        viewer: &Viewer,
        input: CreateTemplateInput,
    ) -> TemplateResult<DefectTemplate> {
        let principal = require_principal(viewer)?;

        if input.global && !principal.role.is_admin() {
            return Err(TemplateError::ForbiddenField("global".to_string()));
        }

        let draft = TemplateDraft::new(&input.name, input.fields, &input.body)
            .map_err(TemplateError::Validation)?;

        let owner = (!input.global).then_some(principal.user_id);
        let template = DefectTemplate::new(owner, draft);

        self.repo.insert(&template).await?;

        tracing::info!(
            template_id = %template.id,
            user_id = %principal.user_id,
            global = template.is_global(),
            "Defect template created"
        );

        Ok(template)
    }
}
