//! Shared view of how far the explorer has followed the chain.
//!
//! `ChainState` is written by the block history refresh loop and read by request handlers to
//! compute confirmation counts without touching the history lock.

use arc_swap::ArcSwap;
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::trace;

/// Newest block ingested into the history cache.
#[derive(Clone, Debug, Default)]
struct ChainTip {
    height: u64,
    hash: String,
}

/// Cursor and daemon tip published by the block history cache.
///
/// # Thread Safety
///
/// All methods are lock-free. The cached tip is swapped atomically through `ArcSwap` so
/// height and hash are always read as a pair; the daemon tip and update timestamp are plain
/// atomics with `Acquire`/`Release` ordering.
///
/// # Example
///
/// ```
/// use explorer_core::chain::ChainState;
///
/// let state = ChainState::new();
/// state.advance(1000, "ab".repeat(32));
///
/// assert_eq!(state.current_height(), 1000);
/// assert_eq!(state.confirmations(1000), 1);
/// assert_eq!(state.confirmations(990), 11);
/// assert_eq!(state.confirmations(1001), 0);
/// ```
#[derive(Clone)]
pub struct ChainState {
    tip: Arc<ArcSwap<ChainTip>>,

    /// Tip height last reported by the daemon.
    daemon_tip: Arc<AtomicU64>,

    /// Unix timestamp (seconds) of the last cached-tip advance.
    last_advance: Arc<AtomicU64>,
}

fn current_unix_timestamp() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

impl ChainState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tip: Arc::new(ArcSwap::from_pointee(ChainTip::default())),
            daemon_tip: Arc::new(AtomicU64::new(0)),
            last_advance: Arc::new(AtomicU64::new(current_unix_timestamp())),
        }
    }

    /// Height of the newest block in the history cache; zero before the first ingestion.
    #[inline]
    #[must_use]
    pub fn current_height(&self) -> u64 {
        self.tip.load().height
    }

    /// Hash of the newest cached block.
    #[must_use]
    pub fn current_hash(&self) -> String {
        self.tip.load().hash.clone()
    }

    #[inline]
    #[must_use]
    pub fn daemon_tip(&self) -> u64 {
        self.daemon_tip.load(Ordering::Acquire)
    }

    /// Number of blocks the cache still has to ingest to reach the daemon's tip.
    #[inline]
    #[must_use]
    pub fn lag(&self) -> u64 {
        self.daemon_tip().saturating_sub(self.current_height())
    }

    /// Seconds since the cached tip last advanced.
    #[inline]
    #[must_use]
    pub fn tip_age_seconds(&self) -> u64 {
        let last = self.last_advance.load(Ordering::Acquire);
        current_unix_timestamp().saturating_sub(last)
    }

    /// Blocks on top of `block_height`, inclusive, relative to the cached tip.
    ///
    /// Returns 0 for the genesis placeholder height 0 and for heights above the cached tip.
    #[must_use]
    pub fn confirmations(&self, block_height: u64) -> u64 {
        let current = self.current_height();
        if block_height == 0 || block_height > current {
            return 0;
        }
        current - block_height + 1
    }

    /// Publishes a newly ingested block. Ignored unless `height` is above the current tip.
    pub fn advance(&self, height: u64, hash: String) -> bool {
        if height <= self.tip.load().height {
            return false;
        }
        self.tip.store(Arc::new(ChainTip { height, hash }));
        self.last_advance.store(current_unix_timestamp(), Ordering::Release);
        trace!(height = height, "cached tip advanced");
        true
    }

    /// Records the tip height the daemon reported in the latest refresh cycle.
    pub fn set_daemon_tip(&self, height: u64) {
        self.daemon_tip.store(height, Ordering::Release);
    }
}

impl Default for ChainState {
    fn default() -> Self {
        Self::new()
    }
}
