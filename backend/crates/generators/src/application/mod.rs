//! Application Layer

pub mod config;
pub mod generate_iban;
pub mod validate_iban;

pub use config::GeneratorConfig;
pub use generate_iban::{GenerateIbanInput, GenerateIbanUseCase, GeneratedIban};
pub use validate_iban::{IbanValidation, ValidateIbanUseCase};
