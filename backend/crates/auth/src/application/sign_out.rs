//! Sign Out Use Case

use std::sync::Arc;

use crate::domain::identity::IdentityProvider;

pub struct SignOutUseCase<P>
where
    P: IdentityProvider,
{
    identity: Arc<P>,
}

impl<P> SignOutUseCase<P>
where
    P: IdentityProvider,
{
    pub fn new(identity: Arc<P>) -> Self {
        Self { identity }
    }

    /// Revoke the token at the Auth service. Errors are logged only; the
    /// caller clears the cookies regardless.
    pub async fn execute(&self, access_token: &str) {
        match self.identity.sign_out(access_token).await {
            Ok(()) => tracing::info!("User signed out"),
            Err(e) => tracing::warn!(error = %e, "Token revocation failed"),
        }
    }
}
