//! Generate IBAN Use Case

use std::sync::Arc;

use crate::application::config::GeneratorConfig;
use crate::domain::bban::generate_bban;
use crate::domain::country::{Country, UnsupportedCountry};
use crate::domain::iban::Iban;
use crate::domain::seed::{Seed, SeedError};
use crate::error::{GeneratorError, GeneratorResult};

/// Raw request parameters
#[derive(Debug, Clone, Default)]
pub struct GenerateIbanInput {
    pub country: Option<String>,
    pub seed: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeneratedIban {
    pub iban: Iban,
    pub country: Country,
    pub seed: Option<Seed>,
}

pub struct GenerateIbanUseCase {
    config: Arc<GeneratorConfig>,
}

impl GenerateIbanUseCase {
    pub fn new(config: Arc<GeneratorConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self, input: GenerateIbanInput) -> GeneratorResult<GeneratedIban> {
        let country = match input.country.as_deref().map(str::trim) {
            None | Some("") => self.config.default_country,
            Some(raw) => raw.parse::<Country>()?,
        };

        if !self.config.is_enabled(country) {
            return Err(UnsupportedCountry(country.code().to_string()).into());
        }

        // An empty `seed=` means "no seed"
        let seed = match input.seed.filter(|s| !s.is_empty()) {
            Some(raw) if raw.len() > self.config.max_seed_length => {
                return Err(SeedError::Length.into());
            }
            Some(raw) => Some(Seed::new(raw)?),
            None => None,
        };

        let bban = match &seed {
            Some(seed) => generate_bban(country, &mut seed.rng()),
            None => generate_bban(country, &mut rand::rng()),
        };
        let iban = Iban::from_bban(country, &bban);

        // A generated IBAN must always pass our own validator
        if Iban::parse(iban.as_str()).is_err() {
            return Err(GeneratorError::Internal(format!(
                "generated IBAN for {country} failed validation"
            )));
        }

        tracing::debug!(country = %country, seeded = seed.is_some(), "IBAN generated");

        Ok(GeneratedIban {
            iban,
            country,
            seed,
        })
    }
}
