//! Resolve Viewer Use Case
//!
//! Turns an access token into a [`Viewer`]. Never fails: any problem yields
//! an anonymous viewer.

use std::sync::Arc;

use kernel::principal::Viewer;

use crate::domain::identity::{IdentityProvider, IdentityUser};
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::email::Email;

pub struct ResolveViewerUseCase<R, P>
where
    R: ProfileRepository,
    P: IdentityProvider,
{
    repo: Arc<R>,
    identity: Arc<P>,
}

impl<R, P> ResolveViewerUseCase<R, P>
where
    R: ProfileRepository,
    P: IdentityProvider,
{
    pub fn new(repo: Arc<R>, identity: Arc<P>) -> Self {
        Self { repo, identity }
    }

    pub async fn execute(&self, access_token: Option<&str>) -> Viewer {
        let Some(token) = access_token else {
            return Viewer::anonymous();
        };

        let user = match self.identity.get_user(token).await {
            Ok(user) => user,
            Err(e) => {
                tracing::debug!(error = %e, "Access token rejected");
                return Viewer::anonymous();
            }
        };

        match self.repo.find_profile(&user.id).await {
            Ok(Some(profile)) => Viewer::authenticated(profile.to_principal()),
            Ok(None) => self.provision(&user).await,
            Err(e) => {
                tracing::warn!(error = %e, "Profile lookup failed, treating request as anonymous");
                Viewer::anonymous()
            }
        }
    }

    /// Rows owned by the viewer reference `profiles`, so a token user
    /// without a profile gets one before acting.
    async fn provision(&self, user: &IdentityUser) -> Viewer {
        let email = match Email::new(user.email.as_str()) {
            Ok(email) => email,
            Err(_) => {
                tracing::warn!(user_id = %user.id, "Token user has no usable e-mail, treating as anonymous");
                return Viewer::anonymous();
            }
        };

        match self.repo.ensure_profile(&user.id, &email).await {
            Ok(profile) => Viewer::authenticated(profile.to_principal()),
            Err(e) => {
                tracing::warn!(error = %e, "Profile provisioning failed, treating request as anonymous");
                Viewer::anonymous()
            }
        }
    }
}
