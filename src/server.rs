//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, cart storage selection and the
//! Axum server lifecycle.

use crate::config::Config;
use crate::domain::repositories::CartStorage;
use crate::infrastructure::persistence::PgBookRepository;
use crate::infrastructure::session::{MemoryCartStorage, RedisCartStorage};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (with retries)
/// - Apply migrations
/// - Redis cart storage (or in-memory fallback)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails after all retries
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    let cart_storage = connect_cart_storage(&config).await;

    let books = Arc::new(PgBookRepository::new(Arc::new(pool)));
    let state = AppState::new(books, cart_storage, config.catalog_max_page_size);

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Builds the pool from config, retrying the initial connection with
/// exponential backoff (200ms, 400ms, ... capped at 10s).
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let strategy = ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(10))
        .map(jitter)
        .take(config.db_connect_retries);

    let options = &options;
    let database_url = config.database_url.as_str();

    let pool = Retry::spawn(strategy, move || async move {
        options
            .clone()
            .connect(database_url)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Database connection attempt failed"))
    })
    .await
    .context("Failed to connect to database")?;

    Ok(pool)
}

/// Picks Redis when configured and reachable, in-memory storage otherwise.
async fn connect_cart_storage(config: &Config) -> Arc<dyn CartStorage> {
    if let Some(redis_url) = &config.redis_url {
        match RedisCartStorage::connect(redis_url, config.session_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cart storage: Redis");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis: {}. Carts will be kept in memory.",
                    e
                );
            }
        }
    } else {
        tracing::info!("Cart storage: in-memory (Redis not configured)");
    }

    Arc::new(MemoryCartStorage::new())
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
