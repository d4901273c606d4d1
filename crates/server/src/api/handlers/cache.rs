//! Views served straight from the caches.

use axum::{extract::State, Json};
use explorer_core::utils::{format_coin, format_unit};

use crate::api::{
    types::{BlocksResponse, DelegateView, StatsResponse},
    AppState,
};

/// GET /api/blocks
pub async fn blocks(State(state): State<AppState>) -> Json<BlocksResponse> {
    Json(BlocksResponse {
        history: state.block_history.read_snapshot(),
        coin_symbol: state.chain.coin_symbol.clone(),
    })
}

/// GET /api/stats
///
/// Rich list and market data from one published snapshot.
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.chain_stats.read_snapshot();

    Json(StatsResponse {
        circulating_supply_display: format_coin(
            snapshot.circulating_supply,
            state.chain.atomic_units_per_coin,
        ),
        change_24h_display: snapshot.market.as_ref().map(|m| m.change_display()),
        market_cap_display: snapshot.market.as_ref().map(|m| format_unit(m.market_cap_usd)),
        coin_symbol: state.chain.coin_symbol.clone(),
        stats: (*snapshot).clone(),
    })
}

/// GET /api/delegates
pub async fn delegates(State(state): State<AppState>) -> Json<Vec<DelegateView>> {
    Json(state.block_history.delegates().into_iter().map(DelegateView::from).collect())
}
