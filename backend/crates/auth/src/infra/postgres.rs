//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::principal::Role;
use platform::rate_limit::{RateLimitConfig, RateLimitResult, RateLimitStore};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{login_attempt::LoginAttempt, profile::Profile};
use crate::domain::repository::{LoginAuditRepository, ProfileRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Drop rate-limit windows older than `retention_ms`
    pub async fn cleanup_expired(&self, retention_ms: i64) -> AuthResult<u64> {
        let cutoff_ms = Utc::now().timestamp_millis() - retention_ms;

        let deleted = sqlx::query("DELETE FROM rate_limits WHERE window_start_ms < $1")
            .bind(cutoff_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(windows_deleted = deleted, "Cleaned up expired rate limit windows");

        Ok(deleted)
    }
}

// ============================================================================
// Profile Repository Implementation
// ============================================================================

impl ProfileRepository for PgAuthRepository {
    async fn find_profile(&self, user_id: &UserId) -> AuthResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, email, role, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_profile()).transpose()
    }

    async fn ensure_profile(&self, user_id: &UserId, email: &Email) -> AuthResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (id, email, role)
            VALUES ($1, $2, 'user')
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                updated_at = CASE
                    WHEN profiles.email = EXCLUDED.email THEN profiles.updated_at
                    ELSE now()
                END
            RETURNING id, email, role, created_at, updated_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.into_profile()
    }
}

// ============================================================================
// Login Audit Implementation
// ============================================================================

impl LoginAuditRepository for PgAuthRepository {
    async fn record_login_attempt(&self, attempt: &LoginAttempt) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO login_attempts (
                id,
                user_id,
                ip_cidr,
                user_agent_hash,
                email_normalized,
                status,
                reason,
                created_at
            ) VALUES ($1, $2, $3::cidr, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(attempt.id)
        .bind(attempt.user_id.map(|id| id.into_uuid()))
        .bind(attempt.ip_cidr.as_deref())
        .bind(attempt.user_agent_hash.as_deref())
        .bind(&attempt.email_normalized)
        .bind(attempt.status.code())
        .bind(attempt.reason.map(|r| r.code()))
        .bind(attempt.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Rate Limit Store Implementation
// ============================================================================

impl RateLimitStore for PgAuthRepository {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        let now_ms = Utc::now().timestamp_millis();
        let window_start = config.window_start(now_ms);

        let (count,) = sqlx::query_as::<_, (i32,)>(
            r#"
            INSERT INTO rate_limits (bucket_key, window_start_ms, request_count)
            VALUES ($1, $2, 1)
            ON CONFLICT (bucket_key, window_start_ms)
            DO UPDATE SET request_count = rate_limits.request_count + 1
            RETURNING request_count
            "#,
        )
        .bind(key)
        .bind(window_start)
        .fetch_one(&self.pool)
        .await?;

        let result = config.evaluate(i64::from(count), window_start);

        if !result.allowed {
            tracing::warn!(count, max = config.max_requests, "Rate limit exceeded");
        }

        Ok(result)
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> AuthResult<Profile> {
        let role = Role::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Unknown role in profiles: {}", self.role)))?;

        Ok(Profile {
            id: UserId::from_uuid(self.id),
            email: self.email,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
