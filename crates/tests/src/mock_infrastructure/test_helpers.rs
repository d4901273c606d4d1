//! Shared setup for integration tests.

use explorer_core::{
    config::AppConfig,
    rpc::{DaemonClient, HttpClientConfig},
};
use std::time::{Duration, Instant};

pub const TICKER_ID: &str = "vrl-virel";
pub const COIN: u64 = 1_000_000_000;

/// Configuration pointing at mock services, with short intervals and no retries.
///
/// Market data is disabled when `market_url` is `None`.
#[must_use]
pub fn test_config(
    daemon_url: &str,
    market_url: Option<&str>,
    dir: &tempfile::TempDir,
) -> AppConfig {
    let mut config = AppConfig::default();
    config.daemon.url = daemon_url.to_string();
    config.daemon.max_retries = 0;
    config.market.enabled = market_url.is_some();
    if let Some(url) = market_url {
        config.market.base_url = url.to_string();
    }
    config.market.ticker_id = TICKER_ID.to_string();
    config.block_history.max_blocks = 5;
    config.block_history.idle_poll_ms = 20;
    config.block_history.error_backoff_ms = 20;
    config.block_history.delegates_path = dir.path().join("delegates.json");
    config
}

/// Daemon client for `url` that fails fast.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn fast_daemon_client(url: &str) -> DaemonClient {
    let config = HttpClientConfig {
        request_timeout: Duration::from_secs(2),
        max_retries: 0,
        ..HttpClientConfig::default()
    };
    DaemonClient::new(url, config).expect("daemon client should build")
}

/// Polls `condition` every few milliseconds until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
