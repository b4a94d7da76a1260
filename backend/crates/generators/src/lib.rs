//! Generators Backend Module
//!
//! Test-data generators for QA work. Currently: IBANs.
//!
//! - `domain/` - IBAN structure, MOD-97 checksum, country layouts, seeds
//! - `application/` - Generate / validate use cases
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Everything here is pure computation; there is no persistence.

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::GeneratorConfig;
pub use domain::iban::{Iban, IbanError};
pub use error::{GeneratorError, GeneratorResult};
pub use presentation::router::generators_router;

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::country::*;
    pub use crate::domain::seed::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
