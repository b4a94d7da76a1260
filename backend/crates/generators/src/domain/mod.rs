//! Domain Layer
//!
//! IBAN structure (ISO 13616), MOD-97-10 checksum (ISO 7064) and the
//! country-specific BBAN layouts used for generation.

pub mod bban;
pub mod country;
pub mod iban;
pub mod seed;

pub use country::Country;
pub use iban::{Iban, IbanError};
pub use seed::Seed;
