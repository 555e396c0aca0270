//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, upstream client setup, Axum server lifecycle and
//! shutdown cleanup.

use crate::config::Config;
use crate::infrastructure::store::{CacheStore, NullStore, RedisStore, StoreStatus};
use crate::infrastructure::upstream::HttpSocialApi;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result, anyhow};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound for closing the store connection during shutdown.
const STORE_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis store (or NullStore fallback)
/// - Upstream API client
/// - Axum HTTP server with graceful shutdown on SIGINT/SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - The upstream client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
/// - The store connection cannot be closed within [`STORE_CLOSE_TIMEOUT`]
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await;

    let api = HttpSocialApi::new(
        &config.social_api_base_url,
        &config.access_token,
        config.upstream_timeout(),
    )
    .context("Failed to build upstream API client")?;

    let state = AppState::new(Arc::new(api), store.clone());

    let app = app_router(state, &config.access_token, config.cache_ttl_seconds);

    let addr: SocketAddr = config.listen_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing store connection");

    close_store(store.as_ref(), STORE_CLOSE_TIMEOUT).await
}

/// Closes the store, failing if it errors or takes longer than `limit`.
async fn close_store(store: &dyn CacheStore, limit: Duration) -> Result<()> {
    match tokio::time::timeout(limit, store.close()).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(anyhow!("Failed to close store connection: {}", e)),
        Err(_) => Err(anyhow!(
            "Timed out closing store connection after {:?}",
            limit
        )),
    }
}

/// Connects to Redis, falling back to a disabled store on failure.
async fn connect_store(config: &Config) -> Arc<dyn CacheStore> {
    match RedisStore::connect(
        &config.redis_url,
        config.redis_connect_options(),
        StoreStatus::enabled(),
    )
    .await
    {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Caching disabled.", e);
            Arc::new(NullStore::new())
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}
