//! HTTP Handlers

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};

use platform::client::extract_client_context;
use platform::cookie::{
    delete_cookie_header, extract_bearer_token, extract_cookie, set_cookie_header,
};

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, ResolveViewerUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::identity::{IdentityProvider, IdentitySession};
use crate::domain::repository::AuthStore;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, SessionResponse, SignUpRequest, SignUpResponse, UserResponse,
};

/// Shared state for auth handlers and the viewer middleware
pub struct AuthAppState<R, P>
where
    R: AuthStore,
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub identity: Arc<P>,
    pub config: Arc<AuthConfig>,
}

impl<R, P> AuthAppState<R, P>
where
    R: AuthStore,
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, identity: P, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            identity: Arc::new(identity),
            config: Arc::new(config),
        }
    }
}

impl<R, P> Clone for AuthAppState<R, P>
where
    R: AuthStore,
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            identity: self.identity.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R, P>(
    State(state): State<AuthAppState<R, P>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let client = extract_client_context(&headers, Some(addr.ip()));

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.identity.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(
            LoginInput {
                email: req.email,
                password: req.password,
            },
            &client,
        )
        .await?;

    Ok((
        StatusCode::OK,
        session_cookies(&state.config, &output.session),
        Json(LoginResponse {
            user: UserResponse::from(&output.profile),
        }),
    ))
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R, P>(
    State(state): State<AuthAppState<R, P>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.identity.clone());

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
        })
        .await?;

    let body = Json(SignUpResponse {
        user: UserResponse::from(&output.profile),
        requires_email_confirmation: output.requires_email_confirmation(),
    });

    // Cookies only when the Auth service already issued a session
    let response = match &output.session {
        Some(session) => (
            StatusCode::CREATED,
            session_cookies(&state.config, session),
            body,
        )
            .into_response(),
        None => (StatusCode::CREATED, body).into_response(),
    };

    Ok(response)
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R, P>(
    State(state): State<AuthAppState<R, P>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: AuthStore,
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    if let Some(token) = access_token(&headers, &state.config) {
        SignOutUseCase::new(state.identity.clone())
            .execute(&token)
            .await;
    }

    (StatusCode::NO_CONTENT, clear_cookies(&state.config))
}

// ============================================================================
// Session
// ============================================================================

/// GET /api/auth/session
pub async fn session<R, P>(
    State(state): State<AuthAppState<R, P>>,
    headers: HeaderMap,
) -> Json<SessionResponse>
where
    R: AuthStore,
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    let token = access_token(&headers, &state.config);

    let viewer = ResolveViewerUseCase::new(state.repo.clone(), state.identity.clone())
        .execute(token.as_deref())
        .await;

    Json(SessionResponse {
        authenticated: viewer.principal().is_some(),
        user: viewer.principal().map(UserResponse::from),
    })
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Access token from the cookie, falling back to `Authorization: Bearer`
pub(crate) fn access_token(headers: &HeaderMap, config: &AuthConfig) -> Option<String> {
    extract_cookie(headers, &config.access_cookie_name).or_else(|| extract_bearer_token(headers))
}

fn session_cookies(
    config: &AuthConfig,
    session: &IdentitySession,
) -> AppendHeaders<[(header::HeaderName, HeaderValue); 2]> {
    AppendHeaders([
        (
            header::SET_COOKIE,
            set_cookie_header(&config.access_cookie(session.expires_in), &session.access_token),
        ),
        (
            header::SET_COOKIE,
            set_cookie_header(&config.refresh_cookie(), &session.refresh_token),
        ),
    ])
}

fn clear_cookies(config: &AuthConfig) -> AppendHeaders<[(header::HeaderName, HeaderValue); 2]> {
    AppendHeaders([
        (
            header::SET_COOKIE,
            delete_cookie_header(&config.access_cookie(0)),
        ),
        (
            header::SET_COOKIE,
            delete_cookie_header(&config.refresh_cookie()),
        ),
    ])
}
