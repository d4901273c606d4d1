//! Liveness endpoint.

use axum::{extract::State, Json};

use crate::api::{
    types::{HealthResponse, SyncStatus},
    AppState,
};

/// GET /health
///
/// Reports how far the block history trails the daemon tip.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let chain = &state.chain_state;
    let lag = chain.lag();
    let status = if chain.current_height() > 0 && lag == 0 {
        SyncStatus::Synced
    } else {
        SyncStatus::Syncing
    };

    Json(HealthResponse {
        status,
        height: chain.current_height(),
        hash: chain.current_hash(),
        daemon_tip: chain.daemon_tip(),
        lag,
        tip_age_seconds: chain.tip_age_seconds(),
    })
}
