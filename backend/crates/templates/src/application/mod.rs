//! Application Layer

pub mod create_template;
pub mod delete_template;
pub mod get_template;
pub mod list_templates;
pub mod render_template;

pub use create_template::{CreateTemplateInput, CreateTemplateUseCase};
pub use delete_template::DeleteTemplateUseCase;
pub use get_template::GetTemplateUseCase;
pub use list_templates::ListTemplatesUseCase;
pub use render_template::RenderTemplateUseCase;

use kernel::principal::{Principal, Viewer};

use crate::error::{TemplateError, TemplateResult};

pub(crate) fn require_principal(viewer: &Viewer) -> TemplateResult<&Principal> {
    viewer.require().map_err(|_| TemplateError::Unauthenticated)
}
