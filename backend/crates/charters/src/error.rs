//! Charter Error Types

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, code::ErrorCode, kind::ErrorKind};
use thiserror::Error;

pub type CharterResult<T> = Result<T, CharterError>;

#[derive(Debug, Error)]
pub enum CharterError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not authenticated")]
    Unauthenticated,

    /// Missing, or owned by someone else
    #[error("Charter not found")]
    NotFound,

    /// User already has an active charter
    #[error("Active charter already exists")]
    ActiveExists,

    /// Operation needs an active charter
    #[error("Charter is closed")]
    Closed,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CharterError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CharterError::Validation(_) => ErrorCode::ValidationError,
            CharterError::Unauthenticated => ErrorCode::Unauthenticated,
            CharterError::NotFound => ErrorCode::NotFound,
            CharterError::ActiveExists | CharterError::Closed => ErrorCode::Conflict,
            CharterError::Database(_) | CharterError::Internal(_) => ErrorCode::Internal,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CharterError::Validation(msg) => AppError::validation(msg.clone()),
            CharterError::NotFound => {
                AppError::with_code(ErrorCode::NotFound, "Nie znaleziono sesji")
            }
            CharterError::ActiveExists => AppError::with_code(
                ErrorCode::Conflict,
                "Masz już aktywną sesję eksploracyjną. Zakończ ją przed rozpoczęciem nowej.",
            ),
            CharterError::Closed => {
                AppError::with_code(ErrorCode::Conflict, "Sesja została już zakończona")
            }
            other => AppError::from_code(other.code()),
        }
    }

    fn log(&self) {
        match self {
            CharterError::Database(e) => {
                tracing::error!(error = %e, "Charter database error");
            }
            CharterError::Internal(msg) => {
                tracing::error!(message = %msg, "Charter internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Charter error");
            }
        }
    }
}

impl IntoResponse for CharterError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for CharterError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected charter request body");
        CharterError::Validation("Nieprawidłowy format danych JSON".to_string())
    }
}

impl From<QueryRejection> for CharterError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected charter query");
        CharterError::Validation("Nieprawidłowe parametry zapytania".to_string())
    }
}

impl From<PathRejection> for CharterError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected charter path");
        CharterError::Validation("Nieprawidłowy identyfikator".to_string())
    }
}
