//! List Templates Use Case

use std::sync::Arc;

use kernel::principal::Viewer;

use crate::domain::repository::TemplateRepository;
use crate::domain::template::DefectTemplate;
use crate::error::TemplateResult;

pub struct ListTemplatesUseCase<R: TemplateRepository> {
    repo: Arc<R>,
}

impl<R: TemplateRepository> ListTemplatesUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Anonymous viewers see presets only
    pub async fn execute(&self, viewer: &Viewer) -> TemplateResult<Vec<DefectTemplate>> {
        let owner = viewer.user_id();
        self.repo.list_visible(owner.as_ref()).await
    }
}
