//! Values handed out by the caches to readers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    market::MarketSnapshot,
    types::{BlockResponse, RichListEntry},
};

/// A block as held in the history cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachedBlock {
    pub height: u64,
    pub hash: String,
    /// Milliseconds since the epoch, after skew correction.
    pub timestamp: u64,
    pub delegate_id: u64,
    /// `true` when the block carries the blank stake signature.
    pub missed: bool,
    pub tx_count: usize,
    pub total_reward: u64,
    pub miner_reward: u64,
    pub governance_reward: u64,
    pub miner: Option<String>,
}

impl CachedBlock {
    /// Builds a cache entry from a daemon response, storing `timestamp` in place of the
    /// block's self-reported one.
    #[must_use]
    pub fn from_response(response: &BlockResponse, timestamp: u64) -> Self {
        Self {
            height: response.block.height,
            hash: response.hash.clone(),
            timestamp,
            delegate_id: response.block.delegate_id,
            missed: response.block.has_blank_signature(),
            tx_count: response.block.transactions.len(),
            total_reward: response.total_reward,
            miner_reward: response.miner_reward,
            governance_reward: response.governance_reward,
            miner: response.miner.clone(),
        }
    }
}

/// Point-in-time copy of the block history.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlockHistorySnapshot {
    /// Newest first.
    pub blocks: Vec<CachedBlock>,
    pub average_block_time_seconds: f64,
    /// Smoothed clock-skew estimate in milliseconds.
    pub skew_estimate_ms: f64,
    /// Height of the last ingested block.
    pub height: u64,
}

/// Average spacing between cached blocks: the timestamp span between the newest and oldest
/// entries divided by the number of entries. Zero with fewer than two blocks.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_block_time_seconds(blocks: &[CachedBlock]) -> f64 {
    match (blocks.first(), blocks.last()) {
        (Some(newest), Some(oldest)) if blocks.len() > 1 => {
            let span_ms = newest.timestamp.saturating_sub(oldest.timestamp);
            span_ms as f64 / 1000.0 / blocks.len() as f64
        }
        _ => 0.0,
    }
}

/// Rich list and market data published together by the chain statistics cache.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChainStatsSnapshot {
    pub rich_list: Vec<RichListEntry>,
    /// `None` when market data is disabled or has not been fetched yet.
    pub market: Option<MarketSnapshot>,
    pub circulating_supply: u64,
    pub updated_at: Option<DateTime<Utc>>,
}
