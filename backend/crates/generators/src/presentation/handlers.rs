//! HTTP Handlers for the generators

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::header,
    response::{IntoResponse, Response},
};

use crate::application::{GenerateIbanInput, GenerateIbanUseCase, ValidateIbanUseCase};
use crate::application::config::GeneratorConfig;
use crate::error::GeneratorResult;
use crate::presentation::dto::{
    GenerateIbanQuery, GenerateIbanResponse, OutputFormat, ValidateIbanQuery,
    ValidateIbanResponse,
};

#[derive(Clone)]
pub struct GeneratorAppState {
    pub config: Arc<GeneratorConfig>,
}

impl GeneratorAppState {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// GET /generators/iban
pub async fn generate_iban(
    State(state): State<GeneratorAppState>,
    query: Result<Query<GenerateIbanQuery>, QueryRejection>,
) -> GeneratorResult<Response> {
    let Query(query) = query?;

    let generated = GenerateIbanUseCase::new(state.config.clone()).execute(GenerateIbanInput {
        country: query.country,
        seed: query.seed,
    })?;

    let response = match query.format {
        OutputFormat::Json => Json(GenerateIbanResponse::from(&generated)).into_response(),
        OutputFormat::Text => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            generated.iban.to_string(),
        )
            .into_response(),
    };

    Ok(response)
}

/// GET /validators/iban
pub async fn validate_iban(
    query: Result<Query<ValidateIbanQuery>, QueryRejection>,
) -> GeneratorResult<Json<ValidateIbanResponse>> {
    let Query(query) = query?;
    let validation = ValidateIbanUseCase::new().execute(query.iban.as_deref());
    Ok(Json(validation.into()))
}
