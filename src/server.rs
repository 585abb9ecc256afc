//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, the session store and the Axum
//! server lifecycle.

use crate::config::Config;
use crate::infrastructure::persistence::{
    PgExpirationRepository, PgLinkRepository, PgUserRepository,
};
use crate::routes::{RouterSettings, app_router};
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_sessions_sqlx_store::PostgresStore;

/// Opens the PostgreSQL pool with the configured limits.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Session store (and its table)
/// - Optional HTML snippet
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The HTML snippet file cannot be read
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("Failed to prepare session store")?;

    let html_snippet = match config.html_snippet_file {
        Some(ref path) => {
            let snippet = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read HTML_SNIPPET_FILE {path}"))?;
            tracing::info!(path = %path, "HTML snippet enabled");
            Some(Arc::<str>::from(snippet))
        }
        None => None,
    };

    let pool = Arc::new(pool);
    let state = AppState::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgExpirationRepository::new(pool)),
    );

    let app = app_router(
        state,
        session_store,
        RouterSettings::from_config(&config, html_snippet),
    );

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
