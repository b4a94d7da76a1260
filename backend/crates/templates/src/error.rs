//! Template Error Types

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, code::ErrorCode, kind::ErrorKind};
use thiserror::Error;

use crate::domain::render::RenderError;

pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Field the caller may not set (e.g. `global` without admin role)
    #[error("Forbidden field: {0}")]
    ForbiddenField(String),

    #[error("Not authenticated")]
    Unauthenticated,

    /// Missing, or not visible to the caller
    #[error("Template not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TemplateError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TemplateError::Validation(_) => ErrorCode::ValidationError,
            TemplateError::ForbiddenField(_) => ErrorCode::ForbiddenField,
            TemplateError::Unauthenticated => ErrorCode::Unauthenticated,
            TemplateError::NotFound => ErrorCode::NotFound,
            TemplateError::Database(_) | TemplateError::Internal(_) => ErrorCode::Internal,
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
            TemplateError::Validation(msg) => AppError::validation(msg.clone()),
            TemplateError::ForbiddenField(field) => AppError::with_code(
                ErrorCode::ForbiddenField,
                format!("Brak uprawnień do ustawienia pola `{field}`"),
            ),
            TemplateError::NotFound => {
                AppError::with_code(ErrorCode::NotFound, "Nie znaleziono szablonu")
            }
            other => AppError::from_code(other.code()),
        }
    }

    fn log(&self) {
        match self {
            TemplateError::Database(e) => {
                tracing::error!(error = %e, "Template database error");
            }
            TemplateError::Internal(msg) => {
                tracing::error!(message = %msg, "Template internal error");
            }
            TemplateError::ForbiddenField(field) => {
                tracing::warn!(field = %field, "Template request set a restricted field");
            }
            _ => {
                tracing::debug!(error = %self, "Template error");
            }
        }
    }
}

impl IntoResponse for TemplateError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for TemplateError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected template request body");
        TemplateError::Validation("Nieprawidłowy format danych JSON".to_string())
    }
}

impl From<PathRejection> for TemplateError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected template path");
        TemplateError::Validation("Nieprawidłowy identyfikator".to_string())
    }
}

impl From<RenderError> for TemplateError {
    fn from(err: RenderError) -> Self {
        TemplateError::Validation(err.message())
    }
}
