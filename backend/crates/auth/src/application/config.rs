//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::rate_limit::RateLimitConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Access token cookie name
    pub access_cookie_name: String,
    /// Refresh token cookie name
    pub refresh_cookie_name: String,
    /// Refresh cookie lifetime
    pub refresh_cookie_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Per-IP login attempts
    pub login_rate_limit: RateLimitConfig,
    /// How long finished rate-limit windows are kept
    pub rate_limit_retention: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: "sb-access-token".to_string(),
            refresh_cookie_name: "sb-refresh-token".to_string(),
            refresh_cookie_ttl: Duration::from_secs(30 * 24 * 3600), // 30 days
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            login_rate_limit: RateLimitConfig::new(5, 60),
            rate_limit_retention: Duration::from_secs(24 * 3600),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Cookie holding the access token, living as long as the token
    pub fn access_cookie(&self, expires_in_secs: i64) -> CookieConfig {
        self.cookie(&self.access_cookie_name)
            .with_max_age(expires_in_secs.max(0))
    }

    pub fn refresh_cookie(&self) -> CookieConfig {
        self.cookie(&self.refresh_cookie_name)
            .with_max_age(self.refresh_cookie_ttl.as_secs() as i64)
    }

    fn cookie(&self, name: &str) -> CookieConfig {
        CookieConfig {
            same_site: self.cookie_same_site,
            ..CookieConfig::named(name).with_secure(self.cookie_secure)
        }
    }

    /// Get rate limit retention in milliseconds
    pub fn rate_limit_retention_ms(&self) -> i64 {
        self.rate_limit_retention.as_millis() as i64
    }
}
