//! Mock HTTP services for integration tests.
//!
//! - `DaemonMockBuilder`: mockito server speaking the daemon's JSON-RPC dialect on `/json_rpc`
//! - `MarketMockBuilder`: mockito server serving Coinpaprika-style tickers
//! - Test helpers for configuration and polling
//!
//! ## Usage
//!
//! ```ignore
//! use tests::mock_infrastructure::{BlockResponseBuilder, DaemonMockBuilder};
//!
//! let mut daemon = DaemonMockBuilder::new().await;
//! daemon.mock_chain_info(100, 0).mock_block(&BlockResponseBuilder::new(100).build());
//! ```

pub mod daemon_mock;
pub mod market_mock;
pub mod test_helpers;

pub use daemon_mock::{BlockResponseBuilder, DaemonMockBuilder};
pub use market_mock::MarketMockBuilder;
pub use test_helpers::*;
