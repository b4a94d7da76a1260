//! Sign Up Use Case
//!
//! Validates the registration form, creates the account at the Auth service
//! and the matching profile.

use std::sync::Arc;

use platform::password::{
    ClearTextPassword, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PasswordPolicyError,
};

use crate::domain::entity::profile::Profile;
use crate::domain::identity::{IdentityProvider, IdentitySession};
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub profile: Profile,
    /// Present when the Auth service logs the user in right away
    pub session: Option<IdentitySession>,
}

impl SignUpOutput {
    pub fn requires_email_confirmation(&self) -> bool {
        self.session.is_none()
    }
}

/// Sign up use case
pub struct SignUpUseCase<R, P>
where
    R: ProfileRepository,
    P: IdentityProvider,
{
    repo: Arc<R>,
    identity: Arc<P>,
}

impl<R, P> SignUpUseCase<R, P>
where
    R: ProfileRepository,
    P: IdentityProvider,
{
    pub fn new(repo: Arc<R>, identity: Arc<P>) -> Self {
        Self { repo, identity }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let email = Email::new(input.email)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;

        let password = ClearTextPassword::new(input.password).map_err(policy_error)?;
        password.check_policy().map_err(policy_error)?;
        password
            .check_confirmation(&input.confirm_password)
            .map_err(policy_error)?;

        let outcome = self.identity.sign_up(&email, &password).await?;

        let profile = self.repo.ensure_profile(&outcome.user.id, &email).await?;

        tracing::info!(
            user_id = %profile.id,
            confirmed = outcome.session.is_some(),
            "User signed up"
        );

        Ok(SignUpOutput {
            profile,
            session: outcome.session,
        })
    }
}

/// User-facing message for each policy rule
pub fn policy_message(err: &PasswordPolicyError) -> String {
    match err {
        PasswordPolicyError::Empty | PasswordPolicyError::TooShort { .. } => {
            format!("Hasło musi mieć co najmniej {} znaków", MIN_PASSWORD_LENGTH)
        }
        PasswordPolicyError::TooLong { .. } => {
            format!("Hasło może mieć maksymalnie {} znaki", MAX_PASSWORD_LENGTH)
        }
        PasswordPolicyError::MissingLetter => {
            "Hasło musi zawierać co najmniej jedną literę".to_string()
        }
        PasswordPolicyError::MissingDigit => {
            "Hasło musi zawierać co najmniej jedną cyfrę".to_string()
        }
        PasswordPolicyError::Mismatch => "Hasła nie są identyczne".to_string(),
    }
}

fn policy_error(err: PasswordPolicyError) -> AuthError {
    AuthError::Validation(policy_message(&err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_messages() {
        assert_eq!(
            policy_message(&PasswordPolicyError::TooShort { min: 8, actual: 3 }),
            "Hasło musi mieć co najmniej 8 znaków"
        );
        assert_eq!(
            policy_message(&PasswordPolicyError::TooLong { max: 72, actual: 80 }),
            "Hasło może mieć maksymalnie 72 znaki"
        );
        assert_eq!(
            policy_message(&PasswordPolicyError::Mismatch),
            "Hasła nie są identyczne"
        );
    }
}
