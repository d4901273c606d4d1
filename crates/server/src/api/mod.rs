//! JSON read API over the explorer caches.

pub mod error;
pub mod handlers;
pub mod types;

use axum::{http::StatusCode, routing::get, Router};
use explorer_core::{
    cache::{BlockHistoryCache, ChainStatsCache},
    chain::ChainState,
    config::ChainConfig,
    rpc::DaemonRpc,
    runtime::ExplorerRuntime,
};
use std::{sync::Arc, time::Duration};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub block_history: Arc<BlockHistoryCache>,
    pub chain_stats: Arc<ChainStatsCache>,
    pub chain_state: ChainState,
    pub daemon: Arc<dyn DaemonRpc>,
    pub chain: Arc<ChainConfig>,
}

impl AppState {
    #[must_use]
    pub fn from_runtime(runtime: &ExplorerRuntime) -> Self {
        Self {
            block_history: runtime.block_history().clone(),
            chain_stats: runtime.chain_stats().clone(),
            chain_state: runtime.chain_state().clone(),
            daemon: runtime.daemon().clone(),
            chain: Arc::new(runtime.config().chain.clone()),
        }
    }
}

/// Builds the router with compression, request tracing and a per-request timeout.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(handlers::system::health))
        .route("/api/blocks", get(handlers::cache::blocks))
        .route("/api/stats", get(handlers::cache::stats))
        .route("/api/delegates", get(handlers::cache::delegates))
        .route("/api/block/{id}", get(handlers::lookup::block))
        .route("/api/tx/{txid}", get(handlers::lookup::transaction))
        .route("/api/account/{address}", get(handlers::lookup::account))
        .route("/api/search", get(handlers::lookup::search))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
