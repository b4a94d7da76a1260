//! Generator DTOs

use serde::{Deserialize, Serialize};

use crate::application::{GeneratedIban, IbanValidation};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// `GET /generators/iban` query
#[derive(Debug, Default, Deserialize)]
pub struct GenerateIbanQuery {
    pub country: Option<String>,
    pub seed: Option<String>,
    #[serde(default)]
    pub format: OutputFormat,
}

/// `GET /validators/iban` query
#[derive(Debug, Default, Deserialize)]
pub struct ValidateIbanQuery {
    pub iban: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateIbanResponse {
    pub iban: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    pub formatted: String,
}

impl From<&GeneratedIban> for GenerateIbanResponse {
    fn from(generated: &GeneratedIban) -> Self {
        Self {
            iban: generated.iban.to_string(),
            country: generated.country.code().to_string(),
            seed: generated.seed.as_ref().map(|s| s.to_string()),
            formatted: generated.iban.formatted(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ValidateIbanResponse {
    Valid {
        valid: bool,
        iban: String,
        country: String,
        formatted: String,
    },
    Invalid {
        valid: bool,
        reason: String,
    },
}

impl From<IbanValidation> for ValidateIbanResponse {
    fn from(validation: IbanValidation) -> Self {
        match validation {
            IbanValidation::Valid(iban) => ValidateIbanResponse::Valid {
                valid: true,
                country: iban.country_code().to_string(),
                formatted: iban.formatted(),
                iban: iban.to_string(),
            },
            IbanValidation::Invalid(err) => ValidateIbanResponse::Invalid {
                valid: false,
                reason: err.reason(),
            },
        }
    }
}
