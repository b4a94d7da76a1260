//! KB Router

use axum::{Router, routing::get};

use crate::application::config::KbConfig;
use crate::domain::repository::KbRepository;
use crate::infra::postgres::PgKbRepository;
use crate::presentation::handlers::{self, KbAppState};

/// Create the KB router with PostgreSQL
pub fn kb_router(repo: PgKbRepository, config: KbConfig) -> Router {
    kb_router_generic(repo, config)
}

/// Create a generic KB router for any repository implementation.
///
/// Expects a `Viewer` in the request extensions (see the auth middleware);
/// requests without one are treated as anonymous.
pub fn kb_router_generic<R>(repo: R, config: KbConfig) -> Router
where
    R: KbRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/entries",
            get(handlers::list_entries::<R>).post(handlers::create_entry::<R>),
        )
        .route(
            "/entries/{id}",
            get(handlers::get_entry::<R>)
                .put(handlers::update_entry::<R>)
                .delete(handlers::delete_entry::<R>),
        )
        .with_state(KbAppState::new(repo, config))
}
