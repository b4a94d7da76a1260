//! Profile Entity
//!
//! Application-side record of an Auth service user. The id is the Auth
//! service's user id; the role lives only here.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::principal::{Principal, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Fresh profile with the default role
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: email.into(),
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_principal(&self) -> Principal {
        Principal {
            user_id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}
