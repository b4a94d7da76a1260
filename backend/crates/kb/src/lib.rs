//! Knowledge Base Backend Module
//!
//! Bookmarked testing resources: title, URL and tags, private by default
//! or shared publicly.
//!
//! - `domain/` - Entry entity, URL canonicalisation, cursors, repository trait
//! - `application/` - List / get / create / update / delete use cases
//! - `infra/` - PostgreSQL repository
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::KbConfig;
pub use error::{KbError, KbResult};
pub use infra::postgres::PgKbRepository;
pub use presentation::router::{kb_router, kb_router_generic};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entry::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
