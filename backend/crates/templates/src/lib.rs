//! Defect Templates Backend Module
//!
//! Reusable bug-report skeletons. A template declares typed fields and a
//! markdown body with `{{key}}` placeholders; rendering fills the body from
//! submitted values. Global presets are shared, the rest are private.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{TemplateError, TemplateResult};
pub use infra::postgres::PgTemplateRepository;
pub use presentation::router::{templates_router, templates_router_generic};

#[cfg(test)]
mod tests;
