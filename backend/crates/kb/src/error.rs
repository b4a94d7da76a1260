//! Knowledge Base Error Types

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, code::ErrorCode, kind::ErrorKind};
use thiserror::Error;

pub type KbResult<T> = Result<T, KbError>;

#[derive(Debug, Error)]
pub enum KbError {
    /// Input failed validation; the message is shown to the user
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Body tried to set a server-managed field
    #[error("Forbidden field: {0}")]
    ForbiddenField(String),

    #[error("Not authenticated")]
    Unauthenticated,

    /// Missing, or not visible to the caller
    #[error("Entry not found")]
    NotFound,

    /// Same canonical URL already bookmarked by this user
    #[error("Duplicate entry URL")]
    DuplicateUrl,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl KbError {
    pub fn code(&self) -> ErrorCode {
        match self {
            KbError::Validation(_) => ErrorCode::ValidationError,
            KbError::ForbiddenField(_) => ErrorCode::ForbiddenField,
            KbError::Unauthenticated => ErrorCode::Unauthenticated,
            KbError::NotFound => ErrorCode::NotFound,
            KbError::DuplicateUrl => ErrorCode::Conflict,
            KbError::Database(_) | KbError::Internal(_) => ErrorCode::Internal,
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
            KbError::Validation(msg) => AppError::validation(msg.clone()),
            KbError::ForbiddenField(field) => AppError::with_code(
                ErrorCode::ForbiddenField,
                format!("Pole `{field}` nie może być ustawiane przez klienta"),
            ),
            KbError::NotFound => {
                AppError::with_code(ErrorCode::NotFound, "Nie znaleziono wpisu")
            }
            KbError::DuplicateUrl => AppError::with_code(
                ErrorCode::Conflict,
                "Wpis z tym adresem URL już istnieje",
            ),
            other => AppError::from_code(other.code()),
        }
    }

    fn log(&self) {
        match self {
            KbError::Database(e) => {
                tracing::error!(error = %e, "KB database error");
            }
            KbError::Internal(msg) => {
                tracing::error!(message = %msg, "KB internal error");
            }
            KbError::ForbiddenField(field) => {
                tracing::warn!(field = %field, "KB request tried to set a server-managed field");
            }
            _ => {
                tracing::debug!(error = %self, "KB error");
            }
        }
    }
}

impl IntoResponse for KbError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for KbError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected KB request body");
        KbError::Validation("Nieprawidłowy format danych JSON".to_string())
    }
}

impl From<QueryRejection> for KbError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected KB query");
        KbError::Validation("Nieprawidłowe parametry zapytania".to_string())
    }
}

impl From<PathRejection> for KbError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected KB path");
        KbError::Validation("Nieprawidłowy identyfikator".to_string())
    }
}
