//! Login Use Case
//!
//! validate -> per-IP rate limit -> password grant -> profile -> audit

use std::sync::Arc;

use chrono::Utc;
use platform::client::ClientContext;
use platform::password::ClearTextPassword;
use platform::rate_limit::RateLimitStore;

use crate::application::config::AuthConfig;
use crate::domain::entity::login_attempt::{LoginAttempt, LoginFailureReason};
use crate::domain::entity::profile::Profile;
use crate::domain::identity::{IdentityError, IdentityProvider, IdentitySession};
use crate::domain::repository::{LoginAuditRepository, ProfileRepository};
use crate::domain::value_object::email::{self, Email};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub profile: Profile,
    pub session: IdentitySession,
}

/// Login use case
pub struct LoginUseCase<R, P>
where
    R: ProfileRepository + LoginAuditRepository + RateLimitStore,
    P: IdentityProvider,
{
    repo: Arc<R>,
    identity: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<R, P> LoginUseCase<R, P>
where
    R: ProfileRepository + LoginAuditRepository + RateLimitStore,
    P: IdentityProvider,
{
    pub fn new(repo: Arc<R>, identity: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            identity,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: LoginInput,
        client: &ClientContext,
    ) -> AuthResult<LoginOutput> {
        let email_normalized = email::normalize(&input.email);

        let (email, password) = match validate(input) {
            Ok(valid) => valid,
            Err(e) => {
                self.audit(LoginAttempt::failure(
                    &email_normalized,
                    LoginFailureReason::ValidationError,
                    client,
                ))
                .await;
                return Err(e);
            }
        };

        self.check_rate_limit(&email_normalized, client).await?;

        let session = match self
            .identity
            .sign_in_with_password(&email, &password)
            .await
        {
            Ok(session) => session,
            Err(e) => {
                let reason = match e {
                    IdentityError::InvalidCredentials => LoginFailureReason::InvalidCredentials,
                    _ => LoginFailureReason::ProviderError,
                };
                self.audit(LoginAttempt::failure(&email_normalized, reason, client))
                    .await;
                return Err(e.into());
            }
        };

        let profile = self
            .repo
            .ensure_profile(&session.user.id, &email)
            .await?;

        self.audit(LoginAttempt::success(profile.id, &email_normalized, client))
            .await;

        tracing::info!(user_id = %profile.id, role = %profile.role, "User logged in");

        Ok(LoginOutput { profile, session })
    }

    /// Fixed-window counter keyed by client IP. Store failures let the
    /// attempt through.
    async fn check_rate_limit(
        &self,
        email_normalized: &str,
        client: &ClientContext,
    ) -> AuthResult<()> {
        let key = format!("login:{}", client.ip_key());
        let limit = &self.config.login_rate_limit;

        match self.repo.check_and_increment(&key, limit).await {
            Ok(result) if !result.allowed => {
                self.audit(LoginAttempt::failure(
                    email_normalized,
                    LoginFailureReason::RateLimited,
                    client,
                ))
                .await;
                Err(AuthError::RateLimited {
                    retry_after_secs: result.retry_after_secs(Utc::now().timestamp_millis()),
                })
            }
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!(error = %e, "Login rate limiter unavailable, allowing attempt");
                Ok(())
            }
        }
    }

    /// Audit failures never fail the login
    async fn audit(&self, attempt: LoginAttempt) {
        if let Err(e) = self.repo.record_login_attempt(&attempt).await {
            tracing::warn!(
                error = %e,
                status = attempt.status.code(),
                "Failed to record login attempt"
            );
        }
    }
}

fn validate(input: LoginInput) -> AuthResult<(Email, ClearTextPassword)> {
    let email = Email::new(input.email).map_err(|e| AuthError::Validation(e.message().to_string()))?;
    let password = ClearTextPassword::new(input.password)
        .map_err(|_| AuthError::Validation("Hasło jest wymagane".to_string()))?;
    Ok((email, password))
}
