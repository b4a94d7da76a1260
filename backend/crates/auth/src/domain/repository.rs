//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Rate limit counters use `platform::rate_limit::RateLimitStore`.

use kernel::id::UserId;

use crate::domain::entity::{login_attempt::LoginAttempt, profile::Profile};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Profile repository trait
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    /// Find profile by user ID
    async fn find_profile(&self, user_id: &UserId) -> AuthResult<Option<Profile>>;

    /// Return the profile, creating it with role `user` when missing.
    /// Keeps the stored e-mail in sync with the Auth service.
    async fn ensure_profile(&self, user_id: &UserId, email: &Email) -> AuthResult<Profile>;
}

/// Login audit trail
#[trait_variant::make(LoginAuditRepository: Send)]
pub trait LocalLoginAuditRepository {
    /// Append one attempt
    async fn record_login_attempt(&self, attempt: &LoginAttempt) -> AuthResult<()>;
}

/// Everything the auth handlers need from storage
pub trait AuthStore:
    ProfileRepository
    + LoginAuditRepository
    + platform::rate_limit::RateLimitStore
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> AuthStore for T where
    T: ProfileRepository
        + LoginAuditRepository
        + platform::rate_limit::RateLimitStore
        + Clone
        + Send
        + Sync
        + 'static
{
}
