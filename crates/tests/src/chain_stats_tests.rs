//! Chain statistics cache against mock daemon and market servers.

use crate::mock_infrastructure::{
    fast_daemon_client, DaemonMockBuilder, MarketMockBuilder, COIN, TICKER_ID,
};
use explorer_core::{
    cache::{ChainStatsCache, RefreshError},
    config::ChainStatsConfig,
    market::{CoinpaprikaClient, MarketDataProvider},
};
use std::{sync::Arc, time::Duration};

async fn daemon_with_rich_list() -> DaemonMockBuilder {
    let mut daemon = DaemonMockBuilder::new().await;
    daemon
        .mock_chain_info(100, 1_000 * COIN)
        .mock_rich_list(&[("vrl1whale", 500 * COIN), ("vrl1dolphin", 100 * COIN)]);
    daemon
}

fn stats(daemon: &DaemonMockBuilder, market: Option<&MarketMockBuilder>) -> ChainStatsCache {
    let market: Option<Arc<dyn MarketDataProvider>> = market.map(|m| {
        let client = CoinpaprikaClient::new(&m.url(), TICKER_ID, "usd", Duration::from_secs(2))
            .unwrap();
        Arc::new(client) as Arc<dyn MarketDataProvider>
    });
    ChainStatsCache::new(
        Arc::new(fast_daemon_client(&daemon.url())),
        market,
        ChainStatsConfig::default(),
        COIN,
    )
}

#[tokio::test]
async fn test_snapshot_combines_rich_list_and_market() {
    let daemon = daemon_with_rich_list().await;
    let mut market = MarketMockBuilder::new().await;
    market.mock_ticker(TICKER_ID, 0.5, 2.5);
    let cache = stats(&daemon, Some(&market));

    cache.refresh_once().await.unwrap();

    let snapshot = cache.read_snapshot();
    assert_eq!(snapshot.rich_list.len(), 2);
    assert_eq!(snapshot.rich_list[0].address, "vrl1whale");
    assert_eq!(snapshot.circulating_supply, 1_000 * COIN);
    assert!(snapshot.updated_at.is_some());

    let market = snapshot.market.as_ref().unwrap();
    assert!((market.price_usd - 0.5).abs() < f64::EPSILON);
    assert!((market.circulating_supply - 1_000.0).abs() < f64::EPSILON);
    assert!((market.market_cap_usd - 500.0).abs() < f64::EPSILON);
    assert_eq!(market.change_display(), "+2.50%");
}

#[tokio::test]
async fn test_market_disabled_publishes_rich_list_only() {
    let daemon = daemon_with_rich_list().await;
    let cache = stats(&daemon, None);

    cache.refresh_once().await.unwrap();

    let snapshot = cache.read_snapshot();
    assert_eq!(snapshot.rich_list.len(), 2);
    assert!(snapshot.market.is_none());
}

#[tokio::test]
async fn test_market_outage_publishes_nothing() {
    let daemon = daemon_with_rich_list().await;
    let mut market = MarketMockBuilder::new().await;
    market.mock_status(TICKER_ID, 503);
    let cache = stats(&daemon, Some(&market));

    let err = cache.refresh_once().await.unwrap_err();
    assert!(matches!(err, RefreshError::Market(_)));

    let snapshot = cache.read_snapshot();
    assert!(snapshot.rich_list.is_empty());
    assert!(snapshot.updated_at.is_none());
}

#[tokio::test]
async fn test_rich_list_error_publishes_nothing() {
    let mut daemon = DaemonMockBuilder::new().await;
    daemon.mock_chain_info(100, COIN).mock_rpc_error("rich_list", -5, "rich list unavailable");
    let cache = stats(&daemon, None);

    assert!(matches!(cache.refresh_once().await, Err(RefreshError::Rpc(_))));
    assert!(cache.read_snapshot().updated_at.is_none());
}
