//! Repository trait

use kernel::id::{DefectTemplateId, UserId};

use super::template::DefectTemplate;
use crate::error::TemplateResult;

#[trait_variant::make(TemplateRepository: Send)]
pub trait LocalTemplateRepository {
    /// Global presets plus `owner`'s templates; presets first, then by name
    async fn list_visible(&self, owner: Option<&UserId>) -> TemplateResult<Vec<DefectTemplate>>;

    async fn find(&self, id: &DefectTemplateId) -> TemplateResult<Option<DefectTemplate>>;

    async fn insert(&self, template: &DefectTemplate) -> TemplateResult<()>;

    async fn delete(&self, id: &DefectTemplateId) -> TemplateResult<bool>;
}
