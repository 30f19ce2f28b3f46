//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use board_cache::{InMemoryPinnedCache, RedisPinnedCache, RedisPool};
use board_common::{AppConfig, AppError, CacheBackend};
use board_core::PinnedPostCache;
use board_db::{create_pool, run_migrations, PgActivityRepository, PgPostRepository, PgVoteRepository};
use board_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;
use crate::tasks::spawn_reaper;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    health.merge(api).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
    info!("Database migrations applied");

    let ttl = config.posts.pinned_cache_ttl;
    let mut builder = ServiceContextBuilder::new();
    let pinned_cache: Arc<dyn PinnedPostCache> = match config.pinned_cache.backend {
        CacheBackend::Memory => Arc::new(InMemoryPinnedCache::new(ttl)),
        CacheBackend::Redis => {
            let redis_config = config.pinned_cache.redis.as_ref().ok_or_else(|| {
                AppError::Config("REDIS_URL is required for the redis pinned-cache backend".to_string())
            })?;
            let redis_pool =
                RedisPool::from_config(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
            info!("Redis pool created for the pinned-posts cache");
            builder = builder.redis_pool(redis_pool.clone());
            Arc::new(RedisPinnedCache::new(redis_pool, ttl))
        }
    };

    let service_context = builder
        .pool(pool.clone())
        .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
        .vote_repo(Arc::new(PgVoteRepository::new(pool.clone())))
        .activity_repo(Arc::new(PgActivityRepository::new(pool)))
        .pinned_cache(pinned_cache)
        .settings(config.posts.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    // The request-rate limiter falls back to the peer address as its key
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();
    let addr: SocketAddr = address
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address {address}: {e}")))?;
    let reaper = config.reaper.clone();

    let state = create_app_state(config).await?;

    if reaper.enabled {
        spawn_reaper(state.clone(), reaper);
    }

    let app = create_app(state);
    run_server(app, addr).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received");
}
