//! Router assembly
//!
//! Every module router is nested under `/api`; charters and templates are
//! only mounted when their feature flag is on, so disabled modules answer 404.

use auth::{
    AuthAppState, AuthConfig, GoTrueConfig, GoTrueIdentityProvider, PgAuthRepository,
    attach_viewer, auth_router_with_state,
};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use charters::{PgCharterRepository, charters_router};
use generators::{GeneratorConfig, generators_router};
use kb::{KbConfig, PgKbRepository, kb_router};
use sqlx::PgPool;
use templates::{PgTemplateRepository, templates_router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::health::{HealthState, health_router};

pub fn auth_config(config: &AppConfig) -> AuthConfig {
    AuthConfig {
        cookie_secure: config.secure_cookies(),
        ..AuthConfig::default()
    }
}

pub fn build_router(config: &AppConfig, pool: PgPool) -> anyhow::Result<Router> {
    let identity = GoTrueIdentityProvider::new(
        GoTrueConfig::new(&config.supabase_url, &config.supabase_key)
            .with_service_key(config.supabase_service_key.clone()),
    )?;
    let auth_state = AuthAppState::new(
        PgAuthRepository::new(pool.clone()),
        identity,
        auth_config(config),
    );

    let features = config.features;
    let mut api = Router::new().merge(health_router(HealthState {
        pool: pool.clone(),
        env: config.env,
        openrouter_configured: config.openrouter_configured,
    }));

    if features.auth {
        api = api.nest("/auth", auth_router_with_state(auth_state.clone()));
    }
    if features.generators {
        api = api.merge(generators_router(GeneratorConfig::default()));
    }
    if features.kb {
        api = api.nest(
            "/kb",
            kb_router(PgKbRepository::new(pool.clone()), KbConfig::default()),
        );
    }
    if features.charters {
        api = api.nest("/charters", charters_router(PgCharterRepository::new(pool.clone())));
    }
    if features.templates {
        api = api.nest("/templates", templates_router(PgTemplateRepository::new(pool)));
    }

    tracing::info!(
        env = config.env.as_str(),
        charters = features.charters,
        templates = features.templates,
        "Feature flags resolved"
    );

    Ok(Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            attach_viewer::<PgAuthRepository, GoTrueIdentityProvider>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.frontend_origins)))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
