//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod resolve_viewer;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use resolve_viewer::ResolveViewerUseCase;
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
