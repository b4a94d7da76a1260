//! Validate IBAN Use Case

use crate::domain::iban::{Iban, IbanError};

/// Outcome of a validation; invalid input is a normal result, not an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IbanValidation {
    Valid(Iban),
    Invalid(IbanError),
}

#[derive(Debug, Default)]
pub struct ValidateIbanUseCase;

impl ValidateIbanUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, input: Option<&str>) -> IbanValidation {
        match Iban::parse(input.unwrap_or_default()) {
            Ok(iban) => IbanValidation::Valid(iban),
            Err(err) => IbanValidation::Invalid(err),
        }
    }
}
