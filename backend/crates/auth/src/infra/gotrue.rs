//! GoTrue (Supabase Auth) REST client
//!
//! Endpoints used:
//! - `POST /auth/v1/token?grant_type=password`
//! - `POST /auth/v1/signup`
//! - `GET  /auth/v1/user`
//! - `POST /auth/v1/logout`

use std::time::Duration;

use kernel::id::UserId;
use platform::password::ClearTextPassword;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::identity::{
    IdentityError, IdentityProvider, IdentitySession, IdentityUser, SignUpOutcome,
};
use crate::domain::value_object::email::Email;

/// Auth service connection settings
#[derive(Clone)]
pub struct GoTrueConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// Public (anon) API key
    pub anon_key: String,
    /// Service-role key; only used server-side for token revocation
    pub service_key: Option<String>,
    pub timeout: Duration,
}

impl GoTrueConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            service_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_service_key(mut self, key: Option<String>) -> Self {
        self.service_key = key;
        self
    }
}

impl std::fmt::Debug for GoTrueConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoTrueConfig")
            .field("base_url", &self.base_url)
            .field("anon_key", &"[REDACTED]")
            .field("service_key", &self.service_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Identity provider backed by the GoTrue REST API
#[derive(Clone)]
pub struct GoTrueIdentityProvider {
    http: reqwest::Client,
    config: GoTrueConfig,
}

impl GoTrueIdentityProvider {
    pub fn new(config: GoTrueConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.config.base_url, path)
    }

    /// Key used for revocation calls
    fn revocation_key(&self) -> &str {
        self.config
            .service_key
            .as_deref()
            .unwrap_or(&self.config.anon_key)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct GoTrueUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    identities: Option<Vec<serde_json::Value>>,
}

impl GoTrueUser {
    /// With e-mail confirmation on, a repeated sign-up is answered with 200
    /// and a stand-in user that has no identities.
    fn is_existing_account_decoy(&self) -> bool {
        self.identities.as_ref().is_some_and(Vec::is_empty)
    }

    fn into_identity(self, fallback_email: &str) -> IdentityUser {
        IdentityUser {
            id: UserId::from_uuid(self.id),
            email: self.email.unwrap_or_else(|| fallback_email.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
    user: GoTrueUser,
}

fn default_expires_in() -> i64 {
    3600
}

impl TokenResponse {
    fn into_session(self, fallback_email: &str) -> IdentitySession {
        IdentitySession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_in: self.expires_in,
            user: self.user.into_identity(fallback_email),
        }
    }
}

/// Sign-up returns a token response when auto-confirm is on, the bare user
/// otherwise.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(GoTrueUser),
}

/// Error body; GoTrue versions differ in which fields they fill
#[derive(Deserialize, Default)]
struct GoTrueErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl GoTrueErrorBody {
    fn code(&self) -> &str {
        self.error_code
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or_default()
    }

    fn text(&self) -> String {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

async fn error_body(response: reqwest::Response) -> (StatusCode, GoTrueErrorBody) {
    let status = response.status();
    let body = response.json::<GoTrueErrorBody>().await.unwrap_or_default();
    (status, body)
}

fn unavailable(e: reqwest::Error) -> IdentityError {
    IdentityError::Unavailable(e.to_string())
}

/// Map a sign-up failure to the domain error
fn classify_sign_up_error(status: StatusCode, body: &GoTrueErrorBody) -> IdentityError {
    let code = body.code();
    let text = body.text().to_lowercase();

    if code == "user_already_exists"
        || code == "email_exists"
        || text.contains("already registered")
    {
        IdentityError::UserAlreadyExists
    } else if code == "weak_password" {
        IdentityError::WeakPassword(body.text())
    } else {
        IdentityError::Unavailable(format!("signup failed with {}: {}", status, body.text()))
    }
}

/// Map a password-grant failure to the domain error
fn classify_sign_in_error(status: StatusCode, body: &GoTrueErrorBody) -> IdentityError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => IdentityError::InvalidCredentials,
        _ => IdentityError::Unavailable(format!(
            "password grant failed with {}: {} {}",
            status,
            body.code(),
            body.text()
        )),
    }
}

fn sign_up_outcome(body: SignUpResponse, email: &str) -> Result<SignUpOutcome, IdentityError> {
    match body {
        SignUpResponse::Session(token) => {
            let session = token.into_session(email);
            Ok(SignUpOutcome {
                user: session.user.clone(),
                session: Some(session),
            })
        }
        SignUpResponse::User(user) if user.is_existing_account_decoy() => {
            Err(IdentityError::UserAlreadyExists)
        }
        SignUpResponse::User(user) => Ok(SignUpOutcome {
            user: user.into_identity(email),
            session: None,
        }),
    }
}

// ============================================================================
// Identity Provider Implementation
// ============================================================================

impl IdentityProvider for GoTrueIdentityProvider {
    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &ClearTextPassword,
    ) -> Result<IdentitySession, IdentityError> {
        let response = self
            .http
            .post(self.url("/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.anon_key)
            .json(&PasswordCredentials {
                email: email.as_str(),
                password: password.expose(),
            })
            .send()
            .await
            .map_err(unavailable)?;

        if !response.status().is_success() {
            let (status, body) = error_body(response).await;
            return Err(classify_sign_in_error(status, &body));
        }

        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(unavailable)?;

        Ok(token.into_session(email.as_str()))
    }

    async fn sign_up(
        &self,
        email: &Email,
        password: &ClearTextPassword,
    ) -> Result<SignUpOutcome, IdentityError> {
        let response = self
            .http
            .post(self.url("/signup"))
            .header("apikey", &self.config.anon_key)
            .json(&PasswordCredentials {
                email: email.as_str(),
                password: password.expose(),
            })
            .send()
            .await
            .map_err(unavailable)?;

        if !response.status().is_success() {
            let (status, body) = error_body(response).await;
            return Err(classify_sign_up_error(status, &body));
        }

        let body = response
            .json::<SignUpResponse>()
            .await
            .map_err(unavailable)?;

        sign_up_outcome(body, email.as_str())
    }

    async fn get_user(&self, access_token: &str) -> Result<IdentityUser, IdentityError> {
        let response = self
            .http
            .get(self.url("/user"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(unavailable)?;

        match response.status() {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(IdentityError::InvalidToken);
            }
            _ => {
                let (status, body) = error_body(response).await;
                return Err(IdentityError::Unavailable(format!(
                    "user lookup failed with {}: {}",
                    status,
                    body.text()
                )));
            }
        }

        let user = response.json::<GoTrueUser>().await.map_err(unavailable)?;
        Ok(user.into_identity(""))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        let response = self
            .http
            .post(self.url("/logout"))
            .header("apikey", self.revocation_key())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(unavailable)?;

        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                Err(IdentityError::InvalidToken)
            }
            s => Err(IdentityError::Unavailable(format!("logout failed with {}", s))),
        }
    }
}
