//! Rich list and market data, refreshed on a fixed timer.
//!
//! Each cycle fetches the circulating supply, the rich list and (optionally) a price ticker,
//! then publishes all of them as one immutable [`ChainStatsSnapshot`] through `ArcSwap`.
//! Readers always see a complete snapshot from a single cycle.

use arc_swap::ArcSwap;
use std::sync::Arc;
use tokio::{
    sync::broadcast,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use super::{errors::RefreshError, types::ChainStatsSnapshot};
use crate::{
    config::ChainStatsConfig,
    market::{MarketDataProvider, MarketSnapshot},
    rpc::DaemonRpc,
};

pub struct ChainStatsCache {
    rpc: Arc<dyn DaemonRpc>,
    market: Option<Arc<dyn MarketDataProvider>>,
    config: ChainStatsConfig,
    atomic_units_per_coin: u64,
    snapshot: ArcSwap<ChainStatsSnapshot>,
}

impl ChainStatsCache {
    /// Creates an empty cache. With `market` set to `None` snapshots carry no market data.
    #[must_use]
    pub fn new(
        rpc: Arc<dyn DaemonRpc>,
        market: Option<Arc<dyn MarketDataProvider>>,
        config: ChainStatsConfig,
        atomic_units_per_coin: u64,
    ) -> Self {
        Self {
            rpc,
            market,
            config,
            atomic_units_per_coin,
            snapshot: ArcSwap::from_pointee(ChainStatsSnapshot::default()),
        }
    }

    /// Fetches fresh statistics and publishes them. On error the previous snapshot stays.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`] if the daemon or the market provider fails.
    pub async fn refresh_once(&self) -> Result<(), RefreshError> {
        let info = self.rpc.get_chain_info().await?;
        let rich_list = self.rpc.get_rich_list().await?;

        let market = match &self.market {
            Some(provider) => {
                let ticker = provider.get_ticker().await?;
                Some(MarketSnapshot::from_ticker(
                    ticker,
                    info.circulating_supply,
                    self.atomic_units_per_coin,
                ))
            }
            None => None,
        };

        debug!(
            entries = rich_list.richest.len(),
            price_usd = market.as_ref().map(|m| m.price_usd),
            "chain stats refreshed"
        );

        self.snapshot.store(Arc::new(ChainStatsSnapshot {
            rich_list: rich_list.richest,
            market,
            circulating_supply: info.circulating_supply,
            updated_at: Some(chrono::Utc::now()),
        }));
        Ok(())
    }

    /// Refreshes on every tick of `refresh_interval` (first tick immediately) until shutdown.
    pub async fn run(self: Arc<Self>, mut shutdown_rx: broadcast::Receiver<()>) {
        let mut ticker = interval(self.config.refresh_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_secs = self.config.refresh_interval_seconds,
            market = self.market.is_some(),
            "chain stats refresher started"
        );

        loop {
            tokio::select! {
                biased;

                _ = shutdown_rx.recv() => break,
                _ = ticker.tick() => {
                    tokio::select! {
                        biased;

                        _ = shutdown_rx.recv() => break,
                        result = self.refresh_once() => {
                            if let Err(e) = result {
                                warn!(
                                    error = %e,
                                    transient = e.is_transient(),
                                    "chain stats refresh failed"
                                );
                            }
                        }
                    }
                }
            }
        }

        info!("chain stats refresher shutting down");
    }

    /// Returns the latest published snapshot.
    #[must_use]
    pub fn read_snapshot(&self) -> Arc<ChainStatsSnapshot> {
        self.snapshot.load_full()
    }
}
