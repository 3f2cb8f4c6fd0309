//! Roster application composition root
//!
//! Composes the domain routers into a single application.

use axum::Router;
use roster_common::{Config, StorageBackend};
use roster_teams::{TeamsRepositories, TeamsState};
use sqlx::postgres::PgPoolOptions;

/// Create the main application router for the configured storage backend
pub async fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let repos = create_repositories(config).await?;
    Ok(router(TeamsState::new(repos, config)))
}

/// Connect the repositories selected by `STORAGE_BACKEND`
pub async fn create_repositories(config: &Config) -> Result<TeamsRepositories, anyhow::Error> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage backend");
            Ok(TeamsRepositories::in_memory())
        }
        StorageBackend::Postgres => {
            let database_url = config.database_url.as_deref().ok_or_else(|| {
                anyhow::anyhow!("DATABASE_URL is required for the postgres storage backend")
            })?;

            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;
            tracing::info!("Database connection established");

            roster_teams::run_migrations(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Database migration failed: {}", e))?;
            tracing::info!("Database migrations applied");

            Ok(TeamsRepositories::postgres(pool))
        }
    }
}

/// Build the router over an already assembled domain state
pub fn router(teams_state: TeamsState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Roster API v0.0.1-SNAPSHOT" }),
        )
        .merge(roster_teams::routes().with_state(teams_state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
