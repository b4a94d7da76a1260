//! Charters Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::CharterRepository;
use crate::infra::postgres::PgCharterRepository;
use crate::presentation::handlers::{self, CharterAppState};

/// Create the charters router with PostgreSQL
pub fn charters_router(repo: PgCharterRepository) -> Router {
    charters_router_generic(repo)
}

/// Create a generic charters router for any repository implementation
pub fn charters_router_generic<R>(repo: R) -> Router
where
    R: CharterRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::list_charters::<R>).post(handlers::start_charter::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_charter::<R>).delete(handlers::delete_charter::<R>),
        )
        .route("/{id}/stop", post(handlers::stop_charter::<R>))
        .route("/{id}/notes", post(handlers::add_note::<R>))
        .with_state(CharterAppState {
            repo: Arc::new(repo),
        })
}
