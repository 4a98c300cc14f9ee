//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use regret_cache::{MemoryVoteLedgerProvider, RedisPool, RedisVoteLedgerProvider};
use regret_common::{AppConfig, AppError};
use regret_core::{DocumentStore, VoteLedgerProvider};
use regret_db::{create_pool, MemoryDocumentStore, PgDocumentStore};
use regret_service::{ServiceContext, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = create_router(&config.rate_limit);
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Connect the document store and vote ledger named by the configuration
///
/// Without `DATABASE_URL` documents live in process memory, and without
/// `REDIS_URL` so do the vote ledgers.
pub async fn build_service_context(config: &AppConfig) -> Result<ServiceContext, AppError> {
    let store: Arc<dyn DocumentStore> = match &config.database {
        Some(database) => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&regret_db::DatabaseConfig::from(database))
                .await
                .map_err(|e| AppError::Store(e.to_string()))?;
            let store = PgDocumentStore::new(pool);
            store.ensure_schema().await?;
            info!("PostgreSQL document store ready");
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL not set, documents are kept in memory");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    let vote_ledgers: Arc<dyn VoteLedgerProvider> = match &config.redis {
        Some(redis) => {
            info!("Connecting to Redis...");
            let pool = RedisPool::from_config(redis).map_err(|e| AppError::Ledger(e.to_string()))?;
            Arc::new(RedisVoteLedgerProvider::new(pool))
        }
        None => {
            warn!("REDIS_URL not set, vote ledgers are kept in memory");
            Arc::new(MemoryVoteLedgerProvider::new())
        }
    };

    ServiceContextBuilder::new()
        .store(store)
        .vote_ledgers(vote_ledgers)
        .feed(config.feed.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let service_context = build_service_context(&config).await?;
    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
