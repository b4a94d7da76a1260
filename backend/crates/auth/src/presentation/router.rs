//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::identity::IdentityProvider;
use crate::domain::repository::AuthStore;
use crate::infra::gotrue::GoTrueIdentityProvider;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL and GoTrue
pub fn auth_router(
    repo: PgAuthRepository,
    identity: GoTrueIdentityProvider,
    config: AuthConfig,
) -> Router {
    auth_router_generic(repo, identity, config)
}

/// Create a generic Auth router for any repository / provider implementation
pub fn auth_router_generic<R, P>(repo: R, identity: P, config: AuthConfig) -> Router
where
    R: AuthStore,
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    auth_router_with_state(AuthAppState::new(repo, identity, config))
}

/// Create the Auth router from an existing state (shared with the viewer middleware)
pub fn auth_router_with_state<R, P>(state: AuthAppState<R, P>) -> Router
where
    R: AuthStore,
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<R, P>))
        .route("/signup", post(handlers::sign_up::<R, P>))
        .route("/logout", post(handlers::logout::<R, P>))
        .route("/session", get(handlers::session::<R, P>))
        .with_state(state)
}
