//! Generator Error Types

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, code::ErrorCode, kind::ErrorKind};
use thiserror::Error;

use crate::domain::country::UnsupportedCountry;
use crate::domain::seed::SeedError;

pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Bad query parameter; the message is shown to the user
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GeneratorError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GeneratorError::Validation(_) => ErrorCode::ValidationError,
            GeneratorError::Internal(_) => ErrorCode::Internal,
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
            GeneratorError::Validation(msg) => AppError::validation(msg.clone()),
            GeneratorError::Internal(_) => AppError::from_code(ErrorCode::Internal),
        }
    }

    fn log(&self) {
        match self {
            GeneratorError::Internal(msg) => {
                tracing::error!(message = %msg, "Generator internal error");
            }
            GeneratorError::Validation(msg) => {
                tracing::debug!(message = %msg, "Generator request rejected");
            }
        }
    }
}

impl IntoResponse for GeneratorError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<QueryRejection> for GeneratorError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected generator query");
        GeneratorError::Validation("Nieprawidłowe parametry zapytania".to_string())
    }
}

impl From<SeedError> for GeneratorError {
    fn from(err: SeedError) -> Self {
        GeneratorError::Validation(err.message().to_string())
    }
}

impl From<UnsupportedCountry> for GeneratorError {
    fn from(err: UnsupportedCountry) -> Self {
        GeneratorError::Validation(err.to_string())
    }
}
