//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::AppError`.

mod app;
mod config;
mod health;

use std::net::SocketAddr;

use auth::PgAuthRepository;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "api=info,auth=info,generators=info,kb=info,charters=info,templates=info,tower_http=info"
                .into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Errors here should not prevent server startup
    let retention_ms = app::auth_config(&config).rate_limit_retention_ms();
    match PgAuthRepository::new(pool.clone())
        .cleanup_expired(retention_ms)
        .await
    {
        Ok(deleted) => {
            tracing::info!(rate_limits_deleted = deleted, "Rate limit cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rate limit cleanup failed, continuing anyway");
        }
    }

    let app = app::build_router(&config, pool)?;

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
