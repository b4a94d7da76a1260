//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the identity
//! provider abstraction.

pub mod entity;
pub mod identity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{login_attempt::LoginAttempt, profile::Profile};
pub use identity::{IdentityError, IdentityProvider, IdentitySession, IdentityUser};
pub use repository::{AuthStore, LoginAuditRepository, ProfileRepository};
