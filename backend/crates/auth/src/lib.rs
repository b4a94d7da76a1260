//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and identity traits
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL repositories and the hosted Auth service client
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Login/signup with e-mail + password (identity delegated to GoTrue)
//! - Profiles with roles (`user`, `admin`)
//! - Per-IP login rate limiting (fixed window, fail-open)
//! - Login audit trail with masked IPs and hashed User-Agents
//! - `attach_viewer` middleware resolving the caller for other modules
//!
//! ## Security Model
//! - Passwords are never stored or hashed here
//! - Tokens live in HttpOnly cookies (`sb-access-token`, `sb-refresh-token`)
//! - Wrong e-mail and wrong password are indistinguishable to the client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::gotrue::{GoTrueConfig, GoTrueIdentityProvider};
pub use infra::postgres::PgAuthRepository;
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::attach_viewer;
pub use presentation::router::{auth_router, auth_router_generic, auth_router_with_state};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
