//! Templates Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::TemplateRepository;
use crate::infra::postgres::PgTemplateRepository;
use crate::presentation::handlers::{self, TemplateAppState};

/// Create the templates router with PostgreSQL
pub fn templates_router(repo: PgTemplateRepository) -> Router {
    templates_router_generic(repo)
}

/// Create a generic templates router for any repository implementation
pub fn templates_router_generic<R>(repo: R) -> Router
where
    R: TemplateRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::list_templates::<R>).post(handlers::create_template::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_template::<R>).delete(handlers::delete_template::<R>),
        )
        .route("/{id}/render", post(handlers::render_template::<R>))
        .with_state(TemplateAppState {
            repo: Arc::new(repo),
        })
}
