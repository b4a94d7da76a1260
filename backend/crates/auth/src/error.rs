//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, code::ErrorCode, kind::ErrorKind};
use thiserror::Error;

use crate::domain::identity::IdentityError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed validation; the message is shown to the user
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Wrong e-mail or password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Too many login attempts from this client
    #[error("Rate limit exceeded (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// Sign-up with an e-mail that already has an account
    #[error("E-mail already registered")]
    EmailTaken,

    /// No valid session
    #[error("Not authenticated")]
    Unauthenticated,

    /// Auth service failed or returned something unexpected
    #[error("Identity provider error: {0}")]
    Provider(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Client-visible error code
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::Validation(_) => ErrorCode::ValidationError,
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::RateLimited { .. } => ErrorCode::RateLimited,
            AuthError::EmailTaken => ErrorCode::EmailTaken,
            AuthError::Unauthenticated => ErrorCode::Unauthenticated,
            AuthError::Provider(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorCode::Internal
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(msg) => AppError::validation(msg.clone()),
            AuthError::RateLimited { retry_after_secs } => {
                AppError::from_code(ErrorCode::RateLimited).with_retry_after(*retry_after_secs)
            }
            other => AppError::from_code(other.code()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Provider(msg) => {
                tracing::error!(message = %msg, "Auth service error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RateLimited { retry_after_secs } => {
                tracing::warn!(retry_after_secs, "Login rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected auth request body");
        AuthError::Validation(ErrorCode::ValidationError.default_message().to_string())
    }
}

impl From<IdentityError> for AuthError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidCredentials => AuthError::InvalidCredentials,
            IdentityError::UserAlreadyExists => AuthError::EmailTaken,
            IdentityError::InvalidToken => AuthError::Unauthenticated,
            IdentityError::WeakPassword(_) => {
                AuthError::Validation("Hasło jest zbyt słabe".to_string())
            }
            IdentityError::Unavailable(msg) => AuthError::Provider(msg),
        }
    }
}
