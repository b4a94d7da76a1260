//! Identity Provider
//!
//! Accounts, password hashing and token issuing belong to the hosted Auth
//! service. The application talks to it through this trait; the GoTrue REST
//! implementation lives in `infra::gotrue`.

use kernel::id::UserId;
use platform::password::ClearTextPassword;
use thiserror::Error;

use crate::domain::value_object::email::Email;

/// User as known by the Auth service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUser {
    pub id: UserId,
    pub email: String,
}

/// Token pair issued by the Auth service
#[derive(Clone)]
pub struct IdentitySession {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub user: IdentityUser,
}

impl std::fmt::Debug for IdentitySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentitySession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("user", &self.user)
            .finish()
    }
}

/// Result of a sign-up call
///
/// `session` is `None` when the Auth service requires e-mail confirmation.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user: IdentityUser,
    pub session: Option<IdentitySession>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("User already registered")]
    UserAlreadyExists,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Password rejected by identity provider: {0}")]
    WeakPassword(String),

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Password grant
    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &ClearTextPassword,
    ) -> Result<IdentitySession, IdentityError>;

    /// Register a new account
    async fn sign_up(
        &self,
        email: &Email,
        password: &ClearTextPassword,
    ) -> Result<SignUpOutcome, IdentityError>;

    /// Resolve the user behind an access token
    async fn get_user(&self, access_token: &str) -> Result<IdentityUser, IdentityError>;

    /// Revoke the session behind an access token
    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;
}
