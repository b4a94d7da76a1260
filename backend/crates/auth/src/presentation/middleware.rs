//! Auth Middleware
//!
//! Resolves the caller once per request and stores a [`Viewer`] in the
//! request extensions. Never rejects: handlers that need a user call
//! [`Viewer::require`].
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .nest("/api/kb", kb_router)
//!     .layer(axum::middleware::from_fn_with_state(
//!         auth_state,
//!         attach_viewer::<PgAuthRepository, GoTrueIdentityProvider>,
//!     ));
//! ```

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use kernel::principal::Viewer;

use crate::application::ResolveViewerUseCase;
use crate::domain::identity::IdentityProvider;
use crate::domain::repository::AuthStore;
use crate::presentation::handlers::{AuthAppState, access_token};

/// Middleware that attaches the (possibly anonymous) viewer
pub async fn attach_viewer<R, P>(
    State(state): State<AuthAppState<R, P>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AuthStore,
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    let token = access_token(req.headers(), &state.config);

    let viewer = match token {
        Some(token) => {
            ResolveViewerUseCase::new(state.repo.clone(), state.identity.clone())
                .execute(Some(&token))
                .await
        }
        None => Viewer::anonymous(),
    };

    req.extensions_mut().insert(viewer);

    next.run(req).await
}
