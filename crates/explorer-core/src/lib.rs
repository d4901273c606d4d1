//! # Explorer Core
//!
//! Background caches that sit between a blockchain daemon and an explorer's read API.
//!
//! - **[`cache`]**: the block history cache (bounded newest-first window, delegate uptime,
//!   timestamp skew correction) and the chain statistics cache (rich list plus market data).
//!
//! - **[`rpc`]**: JSON-RPC client for the daemon behind the [`rpc::DaemonRpc`] trait.
//!
//! - **[`market`]**: market-data provider behind the [`market::MarketDataProvider`] trait.
//!
//! - **[`chain`]**: shared tip tracking used for confirmation counts.
//!
//! - **[`runtime`]**: wires everything together and owns the refresh tasks.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────┐            ┌────────────────────┐
//!   │ BlockHistoryCache  │            │  ChainStatsCache   │
//!   └───┬────────────┬───┘            └───┬────────────┬───┘
//!       │            │                    │            │
//!       │            ▼                    ▼            ▼
//!       │      ┌────────────────────────────┐  ┌────────────────────┐
//!       │      │         DaemonRpc          │  │ MarketDataProvider │
//!       │      └────────────────────────────┘  └────────────────────┘
//!       ▼
//!   ┌────────────────────┐
//!   │     ChainState     │
//!   └────────────────────┘
//! ```

pub mod cache;
pub mod chain;
pub mod config;
pub mod market;
pub mod rpc;
pub mod runtime;
pub mod types;
pub mod utils;
