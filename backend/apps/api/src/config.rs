//! Runtime configuration
//!
//! All environment variables are read once at startup and validated into
//! [`AppConfig`]. Parsing goes through a lookup closure so tests never touch
//! the process environment.

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:4321,http://127.0.0.1:4321";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Deployment environment (`ENV_NAME`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvName {
    Local,
    Integration,
    Production,
}

impl EnvName {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EnvName::Local => "local",
            EnvName::Integration => "integration",
            EnvName::Production => "production",
        }
    }
}

impl FromStr for EnvName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "local" => Ok(EnvName::Local),
            "integration" => Ok(EnvName::Integration),
            "production" => Ok(EnvName::Production),
            other => Err(ConfigError::Invalid {
                name: "ENV_NAME",
                reason: format!("unknown environment `{other}` (expected local, integration or production)"),
            }),
        }
    }
}

/// Which feature routers are mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub auth: bool,
    pub generators: bool,
    pub kb: bool,
    pub charters: bool,
    pub templates: bool,
}

impl FeatureFlags {
    pub fn for_env(env: EnvName) -> Self {
        match env {
            EnvName::Local | EnvName::Integration => Self {
                auth: true,
                generators: true,
                kb: true,
                charters: true,
                templates: true,
            },
            // Charters and templates are still in progress
            EnvName::Production => Self {
                auth: true,
                generators: true,
                kb: true,
                charters: false,
                templates: false,
            },
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: EnvName,
    pub features: FeatureFlags,
    pub supabase_url: String,
    pub supabase_key: String,
    pub supabase_service_key: Option<String>,
    pub database_url: String,
    /// Only reported as a capability in `/api/health`
    pub openrouter_configured: bool,
    pub frontend_origins: Vec<String>,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let env: EnvName = get("ENV_NAME").as_deref().unwrap_or("local").parse()?;

        let supabase_url = require("SUPABASE_URL")?;
        if !(supabase_url.starts_with("https://") || supabase_url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                name: "SUPABASE_URL",
                reason: "must be an http(s) URL".to_string(),
            });
        }

        let bind_addr = get("BIND_ADDR")
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .as_deref()
            .unwrap_or(DEFAULT_FRONTEND_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            env,
            features: FeatureFlags::for_env(env),
            supabase_url,
            supabase_key: require("SUPABASE_KEY")?,
            supabase_service_key: get("SUPABASE_SERVICE_KEY"),
            database_url: require("DATABASE_URL")?,
            openrouter_configured: get("OPENROUTER_API_KEY").is_some(),
            frontend_origins,
            bind_addr,
        })
    }

    /// Cookies are `Secure` everywhere but local development
    pub fn secure_cookies(&self) -> bool {
        self.env != EnvName::Local
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("features", &self.features)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_key", &"[REDACTED]")
            .field("supabase_service_key", &self.supabase_service_key.as_ref().map(|_| "[REDACTED]"))
            .field("database_url", &"[REDACTED]")
            .field("openrouter_configured", &self.openrouter_configured)
            .field("frontend_origins", &self.frontend_origins)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}
