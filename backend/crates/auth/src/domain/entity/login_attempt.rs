//! Login Attempt Entity
//!
//! Write-once audit record. Only anonymised client data is kept: the IP is
//! reduced to its /24 (IPv4) or /64 (IPv6) network and the User-Agent to its
//! SHA-256 digest.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::client::ClientContext;
use uuid::Uuid;

/// Longest e-mail kept in the audit trail
const AUDIT_EMAIL_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    Success,
    Failure,
}

impl LoginStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            LoginStatus::Success => "success",
            LoginStatus::Failure => "failure",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailureReason {
    InvalidCredentials,
    RateLimited,
    ValidationError,
    ProviderError,
}

impl LoginFailureReason {
    pub const fn code(&self) -> &'static str {
        match self {
            LoginFailureReason::InvalidCredentials => "invalid_credentials",
            LoginFailureReason::RateLimited => "rate_limited",
            LoginFailureReason::ValidationError => "validation_error",
            LoginFailureReason::ProviderError => "provider_error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginAttempt {
    pub id: Uuid,
    pub user_id: Option<UserId>,
    pub ip_cidr: Option<String>,
    pub user_agent_hash: Option<String>,
    pub email_normalized: String,
    pub status: LoginStatus,
    pub reason: Option<LoginFailureReason>,
    pub created_at: DateTime<Utc>,
}

impl LoginAttempt {
    fn new(
        user_id: Option<UserId>,
        email_normalized: &str,
        status: LoginStatus,
        reason: Option<LoginFailureReason>,
        client: &ClientContext,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            ip_cidr: client.masked_ip(),
            user_agent_hash: client.user_agent_hash(),
            email_normalized: email_normalized
                .chars()
                .take(AUDIT_EMAIL_MAX_LENGTH)
                .collect(),
            status,
            reason,
            created_at: Utc::now(),
        }
    }

    pub fn success(user_id: UserId, email_normalized: &str, client: &ClientContext) -> Self {
        Self::new(
            Some(user_id),
            email_normalized,
            LoginStatus::Success,
            None,
            client,
        )
    }

    pub fn failure(
        email_normalized: &str,
        reason: LoginFailureReason,
        client: &ClientContext,
    ) -> Self {
        Self::new(
            None,
            email_normalized,
            LoginStatus::Failure,
            Some(reason),
            client,
        )
    }
}
