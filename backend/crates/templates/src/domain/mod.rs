//! Domain Layer

pub mod render;
pub mod repository;
pub mod template;

pub use render::{placeholders, render};
pub use repository::TemplateRepository;
pub use template::{DefectTemplate, FieldKind, TemplateDraft, TemplateField};
