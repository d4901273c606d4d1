//! Response bodies of the read API.

use explorer_core::{
    cache::{BlockHistorySnapshot, ChainStatsSnapshot, DelegateRecord},
    types::{AddressInfo, BlockResponse, DelegateInfo, TransactionResponse},
};
use serde::Serialize;

/// Cache freshness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Synced,
    Syncing,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: SyncStatus,
    pub height: u64,
    /// Hash of the newest cached block; empty before the first ingestion.
    pub hash: String,
    pub daemon_tip: u64,
    pub lag: u64,
    pub tip_age_seconds: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlocksResponse {
    #[serde(flatten)]
    pub history: BlockHistorySnapshot,
    pub coin_symbol: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: ChainStatsSnapshot,
    pub circulating_supply_display: String,
    /// Signed 24h change, e.g. `+1.23%`.
    pub change_24h_display: Option<String>,
    /// Market cap in USD with a K/M/G suffix, e.g. `2.50K`.
    pub market_cap_display: Option<String>,
    pub coin_symbol: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DelegateView {
    #[serde(flatten)]
    pub record: DelegateRecord,
    pub uptime: f64,
}

impl From<DelegateRecord> for DelegateView {
    fn from(record: DelegateRecord) -> Self {
        Self { uptime: record.uptime(), record }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockView {
    #[serde(flatten)]
    pub block: BlockResponse,
    pub confirmations: u64,
    pub total_reward_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    pub txid: String,
    #[serde(flatten)]
    pub transaction: TransactionResponse,
    pub confirmations: u64,
    pub amount_display: String,
    pub fee_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub address: String,
    #[serde(flatten)]
    pub info: AddressInfo,
    pub balance_display: String,
    /// Present when the account is registered as a delegate.
    pub delegate: Option<DelegateInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Block,
    Tx,
    Account,
}

/// Where a search query should lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub kind: SearchKind,
    /// Path of the page showing the result, e.g. `/block/1234`.
    pub target: String,
}
