//! Liveness and database check

use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sqlx::PgPool;

use crate::config::EnvName;

const DB_PING_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone)]
pub struct HealthState {
    pub pool: PgPool,
    pub env: EnvName,
    pub openrouter_configured: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub env: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    pub openrouter: bool,
}

pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<HealthState>) -> Response {
    let database_up = ping_database(&state.pool).await;

    let body = HealthResponse {
        status: if database_up { "ok" } else { "degraded" },
        env: state.env.as_str(),
        version: env!("CARGO_PKG_VERSION"),
        database: if database_up { "up" } else { "down" },
        openrouter: state.openrouter_configured,
    };

    let status = if database_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body)).into_response()
}

async fn ping_database(pool: &PgPool) -> bool {
    let ping = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool);
    match tokio::time::timeout(DB_PING_TIMEOUT, ping).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Health check: database query failed");
            false
        }
        Err(_) => {
            tracing::warn!("Health check: database query timed out");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    #[tokio::test]
    async fn unreachable_database_reports_degraded() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy("postgres://qa:qa@127.0.0.1:1/qa")
            .unwrap();
        let app = health_router(HealthState {
            pool,
            env: EnvName::Integration,
            openrouter_configured: true,
        });

        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["database"], "down");
        assert_eq!(body["env"], "integration");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["openrouter"], true);
    }
}
