//! Request principal
//!
//! The auth middleware resolves the caller once per request and stores a
//! [`Viewer`] in the request extensions. Feature crates only depend on these
//! types, never on the auth crate itself.

use serde::{Deserialize, Serialize};

use crate::error::app_error::{AppError, AppResult};
use crate::error::code::ErrorCode;
use crate::id::UserId;

/// Application role stored on the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl Principal {
    /// Owner check with admin override
    pub fn can_manage(&self, owner_id: &UserId) -> bool {
        self.role.is_admin() || &self.user_id == owner_id
    }
}

/// Possibly anonymous caller of the current request
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    principal: Option<Principal>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.principal.as_ref().map(|p| p.user_id)
    }

    pub fn is_admin(&self) -> bool {
        self.principal
            .as_ref()
            .is_some_and(|p| p.role.is_admin())
    }

    /// The principal, or UNAUTHENTICATED
    pub fn require(&self) -> AppResult<&Principal> {
        self.principal
            .as_ref()
            .ok_or_else(|| AppError::from_code(ErrorCode::Unauthenticated))
    }
}

/// Reads the viewer stored by the auth middleware; anonymous when absent
#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Viewer>().cloned().unwrap_or_default())
    }
}
