//! Background caches between the daemon and the HTTP layer.
//!
//! ```text
//!              ┌──────────────┐      ┌──────────────────┐
//!              │    Daemon    │      │ Market provider  │
//!              └──────┬───────┘      └────────┬─────────┘
//!        one block    │    rich list + supply │ ticker
//!        per cycle    │                       │
//!   ┌─────────────────▼──────┐   ┌────────────▼─────────────┐
//!   │   BlockHistoryCache    │   │     ChainStatsCache      │
//!   │ • newest-first window  │   │ • ArcSwap snapshot       │
//!   │ • delegate uptime      │   │ • fixed interval         │
//!   │ • timestamp skew       │   │                          │
//!   └─────────────┬──────────┘   └────────────┬─────────────┘
//!                 │ read_snapshot()           │ read_snapshot()
//!                 └──────────► handlers ◄─────┘
//! ```
//!
//! The two caches are independent: each owns one refresh task, one lock domain and one
//! failure path. Refresh errors never reach readers; they are logged and the cycle is retried.

pub mod block_history;
pub mod chain_stats;
pub mod delegates;
pub mod errors;
pub mod skew;
pub mod types;

pub use block_history::{BlockHistoryCache, RefreshOutcome};
pub use chain_stats::ChainStatsCache;
pub use delegates::{DelegateRecord, DelegateStore};
pub use errors::{PersistenceError, RefreshError};
pub use skew::TimestampAdjustment;
pub use types::{BlockHistorySnapshot, CachedBlock, ChainStatsSnapshot};
