//! Lookups forwarded to the daemon.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use explorer_core::utils::{format_coin, is_hex64};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::api::{
    error::ApiError,
    types::{AccountView, BlockView, SearchKind, SearchResult, TransactionView},
    AppState,
};

/// GET /api/block/{id}
///
/// `id` is a 64-hex block hash or a decimal height. Hashes are checked first.
pub async fn block(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlockView>, ApiError> {
    let id = id.trim();
    let block = if is_hex64(id) {
        state.daemon.get_block_by_hash(id).await
    } else {
        let height = id.parse::<u64>().map_err(|_| {
            ApiError::InvalidIdentifier("block id must be a height or a 64-hex hash".to_string())
        })?;
        state.daemon.get_block_by_height(height).await
    }
    .map_err(|e| ApiError::lookup(e, format!("block {id}")))?;

    Ok(Json(BlockView {
        confirmations: state.chain_state.confirmations(block.block.height),
        total_reward_display: format_coin(block.total_reward, state.chain.atomic_units_per_coin),
        block,
    }))
}

/// GET /api/tx/{txid}
pub async fn transaction(
    State(state): State<AppState>,
    Path(txid): Path<String>,
) -> Result<Json<TransactionView>, ApiError> {
    let txid = txid.trim();
    if !is_hex64(txid) {
        return Err(ApiError::InvalidIdentifier("txid must be 64-hex".to_string()));
    }

    let transaction = state
        .daemon
        .get_transaction(txid)
        .await
        .map_err(|e| ApiError::lookup(e, format!("transaction {txid}")))?;
    let units = state.chain.atomic_units_per_coin;

    Ok(Json(TransactionView {
        txid: txid.to_string(),
        confirmations: state.chain_state.confirmations(transaction.height),
        amount_display: format_coin(transaction.amount, units),
        fee_display: format_coin(transaction.fee, units),
        transaction,
    }))
}

/// GET /api/account/{address}
pub async fn account(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<AccountView>, ApiError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ApiError::InvalidIdentifier("address must not be empty".to_string()));
    }

    let info = state
        .daemon
        .get_address(address)
        .await
        .map_err(|e| ApiError::lookup(e, format!("account {address}")))?;

    let delegate = if info.delegate_id == 0 {
        None
    } else {
        match state.daemon.get_delegate(address).await {
            Ok(delegate) => Some(delegate),
            Err(e) => {
                warn!(
                    address,
                    delegate_id = info.delegate_id,
                    error = %e,
                    "Delegate lookup failed"
                );
                None
            }
        }
    };

    Ok(Json(AccountView {
        address: address.to_string(),
        balance_display: format_coin(info.balance, state.chain.atomic_units_per_coin),
        info,
        delegate,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/search?q=
///
/// Classifies the query: a decimal height is a block; a 64-hex string is a block when some
/// block has that hash and a transaction otherwise; anything else is an account.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResult>, ApiError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(ApiError::InvalidIdentifier("empty search query".to_string()));
    }

    if let Ok(height) = q.parse::<u64>() {
        let target = format!("/block/{height}");
        return Ok(Json(SearchResult { kind: SearchKind::Block, target }));
    }

    if is_hex64(q) {
        let known_block = state.block_history.get_cached_by_hash(q).is_some() ||
            match state.daemon.get_block_by_hash(q).await {
                Ok(_) => true,
                Err(e) => {
                    debug!(query = q, error = %e, "No block with this hash, treating as txid");
                    false
                }
            };
        let kind = if known_block { SearchKind::Block } else { SearchKind::Tx };
        let prefix = if known_block { "block" } else { "tx" };
        return Ok(Json(SearchResult { kind, target: format!("/{prefix}/{q}") }));
    }

    Ok(Json(SearchResult { kind: SearchKind::Account, target: format!("/account/{q}") }))
}
