//! Error Code - client-visible error taxonomy
//!
//! Every error body sent to the frontend carries one of these codes. The
//! frontend switches on the code; the message is shown to the user as-is.

use serde::Serialize;

use super::kind::ErrorKind;

/// API error code
///
/// ## Examples
/// ```rust
/// use kernel::error::code::ErrorCode;
///
/// assert_eq!(ErrorCode::RateLimited.as_str(), "RATE_LIMITED");
/// assert_eq!(ErrorCode::RateLimited.kind().status_code(), 429);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidCredentials,
    RateLimited,
    Unauthenticated,
    ForbiddenField,
    EmailTaken,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorCode {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::ForbiddenField => "FORBIDDEN_FIELD",
            ErrorCode::EmailTaken => "EMAIL_TAKEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// HTTP classification of the code
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::ValidationError | ErrorCode::ForbiddenField => ErrorKind::BadRequest,
            ErrorCode::InvalidCredentials | ErrorCode::Unauthenticated => ErrorKind::Unauthorized,
            ErrorCode::RateLimited => ErrorKind::TooManyRequests,
            ErrorCode::EmailTaken | ErrorCode::Conflict => ErrorKind::Conflict,
            ErrorCode::NotFound => ErrorKind::NotFound,
            ErrorCode::Internal => ErrorKind::InternalServerError,
        }
    }

    /// User-facing (Polish) message used when no specific message is given
    pub const fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Nieprawidłowe dane wejściowe",
            ErrorCode::InvalidCredentials => "Nieprawidłowy e-mail lub hasło",
            ErrorCode::RateLimited => "Zbyt wiele prób. Spróbuj ponownie później.",
            ErrorCode::Unauthenticated => "Musisz być zalogowany, aby wykonać tę operację",
            ErrorCode::ForbiddenField => "Żądanie zawiera niedozwolone pole",
            ErrorCode::EmailTaken => {
                "Nie udało się utworzyć konta. Sprawdź dane lub zaloguj się."
            }
            ErrorCode::NotFound => "Nie znaleziono zasobu",
            ErrorCode::Conflict => "Operacja koliduje z aktualnym stanem zasobu",
            ErrorCode::Internal => "Wystąpił nieoczekiwany błąd. Spróbuj ponownie później.",
        }
    }

    /// Fallback code for an HTTP classification
    pub const fn for_kind(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::BadRequest => ErrorCode::ValidationError,
            ErrorKind::Unauthorized => ErrorCode::Unauthenticated,
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::Conflict => ErrorCode::Conflict,
            ErrorKind::TooManyRequests => ErrorCode::RateLimited,
            ErrorKind::InternalServerError => ErrorCode::Internal,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
