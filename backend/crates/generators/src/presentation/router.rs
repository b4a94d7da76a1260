//! Generators Router

use axum::{Router, routing::get};

use crate::application::config::GeneratorConfig;
use crate::presentation::handlers::{self, GeneratorAppState};

/// Routes: `/generators/iban`, `/validators/iban`
pub fn generators_router(config: GeneratorConfig) -> Router {
    Router::new()
        .route("/generators/iban", get(handlers::generate_iban))
        .route("/validators/iban", get(handlers::validate_iban))
        .with_state(GeneratorAppState::new(config))
}
