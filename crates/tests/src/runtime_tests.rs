//! Runtime lifecycle against mock services.
//!
//! Tests use `tokio::time::timeout` so a stuck refresh task fails instead of hanging.

use crate::mock_infrastructure::{
    test_config, wait_until, BlockResponseBuilder, DaemonMockBuilder, MarketMockBuilder, COIN,
    TICKER_ID,
};
use explorer_core::runtime::{ExplorerRuntime, RuntimeError};
use tokio::time::{timeout, Duration};

async fn populated_daemon(tip: u64) -> DaemonMockBuilder {
    let mut daemon = DaemonMockBuilder::new().await;
    daemon.mock_chain_info(tip, 2_000 * COIN).mock_rich_list(&[("vrl1whale", 900 * COIN)]);
    for height in tip.saturating_sub(4)..=tip {
        daemon.mock_block(&BlockResponseBuilder::new(height).delegate(height % 3 + 1).build());
    }
    daemon
}

#[tokio::test]
async fn test_runtime_fills_both_caches() {
    let dir = tempfile::tempdir().unwrap();
    let daemon = populated_daemon(40).await;
    let mut market = MarketMockBuilder::new().await;
    market.mock_ticker(TICKER_ID, 0.1, -1.0);

    let runtime = ExplorerRuntime::builder()
        .with_config(test_config(&daemon.url(), Some(&market.url()), &dir))
        .build()
        .expect("runtime should build");

    let filled = wait_until(Duration::from_secs(10), || {
        runtime.block_history().current_height() == 40 &&
            runtime.chain_stats().read_snapshot().updated_at.is_some()
    })
    .await;
    assert!(filled, "caches did not fill");

    assert_eq!(runtime.chain_state().current_height(), 40);
    assert_eq!(runtime.chain_state().daemon_tip(), 40);
    assert_eq!(runtime.block_history().read_snapshot().blocks.len(), 5);

    let stats = runtime.chain_stats().read_snapshot();
    assert_eq!(stats.rich_list[0].address, "vrl1whale");
    assert_eq!(stats.market.as_ref().unwrap().change_display(), "-1.00%");

    timeout(Duration::from_secs(10), runtime.shutdown()).await.expect("shutdown timed out");
}

#[tokio::test]
async fn test_runtime_without_market() {
    let dir = tempfile::tempdir().unwrap();
    let daemon = populated_daemon(10).await;

    let runtime = ExplorerRuntime::builder()
        .with_config(test_config(&daemon.url(), None, &dir))
        .build()
        .unwrap();

    let published = wait_until(Duration::from_secs(10), || {
        runtime.chain_stats().read_snapshot().updated_at.is_some()
    })
    .await;
    assert!(published);
    assert!(runtime.chain_stats().read_snapshot().market.is_none());

    timeout(Duration::from_secs(10), runtime.shutdown()).await.expect("shutdown timed out");
}

#[tokio::test]
async fn test_unreachable_daemon_keeps_caches_empty() {
    let dir = tempfile::tempdir().unwrap();

    let runtime = ExplorerRuntime::builder()
        .with_config(test_config("http://127.0.0.1:1", None, &dir))
        .build()
        .unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(runtime.block_history().current_height(), 0);
    assert!(runtime.block_history().read_snapshot().blocks.is_empty());
    assert!(runtime.chain_stats().read_snapshot().updated_at.is_none());

    timeout(Duration::from_secs(10), runtime.shutdown()).await.expect("shutdown timed out");
}

#[tokio::test]
async fn test_shutdown_notifies_external_receivers() {
    let dir = tempfile::tempdir().unwrap();
    let daemon = populated_daemon(10).await;
    let runtime = ExplorerRuntime::builder()
        .with_config(test_config(&daemon.url(), None, &dir))
        .build()
        .unwrap();

    let receivers: Vec<_> = (0..3)
        .map(|_| {
            let mut rx = runtime.shutdown_receiver();
            tokio::spawn(async move { rx.recv().await.is_ok() })
        })
        .collect();

    runtime.shutdown().await;

    for receiver in receivers {
        let notified = timeout(Duration::from_secs(1), receiver).await.unwrap().unwrap();
        assert!(notified);
    }
}

#[tokio::test]
async fn test_builder_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();

    let mut config = test_config("http://127.0.0.1:1", None, &dir);
    config.block_history.max_blocks = 0;
    let result = ExplorerRuntime::builder().with_config(config).build();
    assert!(matches!(result, Err(RuntimeError::ConfigValidation(_))));

    let config = test_config("ftp://127.0.0.1:1", None, &dir);
    let result = ExplorerRuntime::builder().with_config(config).build();
    assert!(matches!(result, Err(RuntimeError::ConfigValidation(_))));

    let result = ExplorerRuntime::builder().build();
    assert!(matches!(result, Err(RuntimeError::ConfigValidation(_))));
}
