//! Rolling window of recently ingested blocks.
//!
//! A single refresh loop follows the daemon one height at a time, keeping at most
//! `max_blocks` entries newest-first, counting staked and missed slots per delegate, and
//! estimating the clock skew between block timestamps and the local wall clock.
//!
//! # Locking
//!
//! Whole refresh cycles are serialized by an async `refresh_guard`, so there is exactly one
//! writer. Network calls happen while holding only that guard; every mutation of a cycle is then
//! applied inside one short `parking_lot` write section. Readers take the read side and never
//! wait on daemon I/O.

use parking_lot::RwLock;
use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, trace, warn};

use super::{
    delegates::{DelegateRecord, DelegateStore},
    errors::RefreshError,
    skew::TimestampAdjustment,
    types::{average_block_time_seconds, BlockHistorySnapshot, CachedBlock},
};
use crate::{chain::ChainState, config::BlockHistoryConfig, rpc::DaemonRpc};

/// Wall clock in milliseconds since the epoch.
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

fn system_clock_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Result of a successful refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// One block was ingested; more may be pending.
    Advanced { height: u64, tip: u64 },
    /// The cache already holds the daemon's tip.
    UpToDate { height: u64 },
}

#[derive(Debug, Default)]
struct HistoryState {
    /// Last ingested height. `None` until the first block lands.
    cursor: Option<u64>,
    blocks: VecDeque<CachedBlock>,
    delegates: HashMap<u64, DelegateRecord>,
    skew: TimestampAdjustment,
}

pub struct BlockHistoryCache {
    rpc: Arc<dyn DaemonRpc>,
    config: BlockHistoryConfig,
    state: RwLock<HistoryState>,
    refresh_guard: Mutex<()>,
    store: DelegateStore,
    chain_state: ChainState,
    clock: Clock,
}

impl BlockHistoryCache {
    /// Creates the cache and loads delegate statistics from `config.delegates_path`.
    ///
    /// A missing or unreadable snapshot is not an error; the cache starts with no delegates.
    #[must_use]
    pub fn new(
        rpc: Arc<dyn DaemonRpc>,
        config: BlockHistoryConfig,
        chain_state: ChainState,
    ) -> Self {
        let store = DelegateStore::new(config.delegates_path.clone());
        let delegates = store.load();

        Self {
            rpc,
            state: RwLock::new(HistoryState {
                blocks: VecDeque::with_capacity(config.max_blocks + 1),
                delegates,
                ..HistoryState::default()
            }),
            config,
            refresh_guard: Mutex::new(()),
            store,
            chain_state,
            clock: Arc::new(system_clock_ms),
        }
    }

    /// Replaces the wall clock used for skew sampling.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn config(&self) -> &BlockHistoryConfig {
        &self.config
    }

    /// Runs one refresh cycle: query the daemon tip and ingest at most one block.
    ///
    /// On the first cycle the cursor starts at `max(1, tip - max_blocks)` instead of genesis.
    /// Any daemon failure aborts the cycle before cached state is touched. A failure to write
    /// the delegate snapshot is logged and does not fail the cycle.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`] if a daemon call fails or returns a block for the wrong height.
    pub async fn refresh_once(&self) -> Result<RefreshOutcome, RefreshError> {
        let _guard = self.refresh_guard.lock().await;

        let info = self.rpc.get_chain_info().await?;
        let tip = info.height;
        self.chain_state.set_daemon_tip(tip);

        let ingested = self.state.read().cursor;
        let cursor = ingested.unwrap_or_else(|| {
            let max_blocks = u64::try_from(self.config.max_blocks).unwrap_or(u64::MAX);
            tip.saturating_sub(max_blocks).max(1)
        });

        if cursor >= tip {
            let height = ingested.unwrap_or(0);
            trace!(height = height, tip = tip, "block history up to date");
            return Ok(RefreshOutcome::UpToDate { height });
        }

        let height = cursor + 1;
        let response = self.rpc.get_block_by_height(height).await?;
        if response.block.height != height {
            return Err(RefreshError::UnexpectedBlock {
                requested: height,
                returned: response.block.height,
            });
        }

        // Only the daemon's freshest block is compared against the wall clock.
        let raw_skew_ms = (height == tip)
            .then(|| i128::from(response.block.timestamp) - i128::from((self.clock)()));
        let timestamp = raw_skew_ms.map_or(response.block.timestamp, |raw| {
            u64::try_from(i128::from(response.block.timestamp) - raw).unwrap_or(0)
        });
        let block = CachedBlock::from_response(&response, timestamp);
        let hash = block.hash.clone();

        let delegates_to_save = {
            let mut state = self.state.write();
            state.cursor = Some(height);

            let delegate_changed = block.delegate_id != 0 &&
                state
                    .delegates
                    .entry(block.delegate_id)
                    .or_insert_with(|| DelegateRecord::new(block.delegate_id))
                    .apply(height, block.missed);

            if let Some(raw) = raw_skew_ms {
                #[allow(clippy::cast_precision_loss)]
                let raw = raw as f64;
                let smoothed = state.skew.observe(raw);
                debug!(raw_ms = raw, smoothed_ms = smoothed, height = height, "timestamp skew");
            }

            if block.missed {
                debug!(height = height, delegate = block.delegate_id, "missed stake slot");
            }

            state.blocks.push_front(block);
            state.blocks.truncate(self.config.max_blocks);

            delegate_changed.then(|| state.delegates.clone())
        };

        self.chain_state.advance(height, hash);

        if let Some(records) = delegates_to_save {
            if let Err(e) = self.store.save(&records).await {
                warn!(
                    error = %e,
                    path = %self.store.path().display(),
                    "failed to persist delegate statistics"
                );
            }
        }

        trace!(height = height, tip = tip, "ingested block");
        Ok(RefreshOutcome::Advanced { height, tip })
    }

    /// Drives [`refresh_once`](Self::refresh_once) until `shutdown_rx` fires.
    ///
    /// After an ingested block the next cycle starts immediately so a backlog drains as fast as
    /// the daemon answers; otherwise the loop sleeps for the idle or error interval.
    pub async fn run(self: Arc<Self>, mut shutdown_rx: broadcast::Receiver<()>) {
        info!(max_blocks = self.config.max_blocks, "block history refresher started");

        loop {
            let outcome = tokio::select! {
                biased;

                _ = shutdown_rx.recv() => break,
                outcome = self.refresh_once() => outcome,
            };

            let delay = match outcome {
                Ok(RefreshOutcome::Advanced { height, tip }) => {
                    if height == tip {
                        info!(height = height, "block history caught up with daemon");
                    }
                    continue;
                }
                Ok(RefreshOutcome::UpToDate { .. }) => self.config.idle_poll(),
                Err(e) => {
                    warn!(
                        error = %e,
                        transient = e.is_transient(),
                        height = self.chain_state.current_height(),
                        tip = self.chain_state.daemon_tip(),
                        "block history refresh failed"
                    );
                    self.config.error_backoff()
                }
            };

            tokio::select! {
                biased;

                _ = shutdown_rx.recv() => break,
                () = tokio::time::sleep(delay) => {}
            }
        }

        info!("block history refresher shutting down");
    }

    /// Returns a copy of the cached blocks with derived statistics.
    #[must_use]
    pub fn read_snapshot(&self) -> BlockHistorySnapshot {
        let state = self.state.read();
        let blocks: Vec<CachedBlock> = state.blocks.iter().cloned().collect();

        BlockHistorySnapshot {
            average_block_time_seconds: average_block_time_seconds(&blocks),
            skew_estimate_ms: state.skew.value(),
            height: state.cursor.unwrap_or(0),
            blocks,
        }
    }

    /// Height of the newest ingested block; 0 before the first ingestion.
    #[must_use]
    pub fn current_height(&self) -> u64 {
        self.state.read().cursor.unwrap_or(0)
    }

    /// All delegate records, sorted by id.
    #[must_use]
    pub fn delegates(&self) -> Vec<DelegateRecord> {
        let mut records: Vec<DelegateRecord> =
            self.state.read().delegates.values().copied().collect();
        records.sort_unstable_by_key(|r| r.id);
        records
    }

    /// Returns the cached block at `height`, if it is inside the window.
    #[must_use]
    pub fn get_cached(&self, height: u64) -> Option<CachedBlock> {
        let state = self.state.read();
        let newest = state.blocks.front()?.height;
        let offset = usize::try_from(newest.checked_sub(height)?).ok()?;
        state.blocks.get(offset).filter(|b| b.height == height).cloned()
    }

    /// Returns the cached block with `hash`, if it is inside the window.
    #[must_use]
    pub fn get_cached_by_hash(&self, hash: &str) -> Option<CachedBlock> {
        self.state.read().blocks.iter().find(|b| b.hash.eq_ignore_ascii_case(hash)).cloned()
    }
}
