//! Builder for wiring the daemon client, market provider and both caches.

use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::lifecycle::ExplorerRuntime;
use crate::{
    cache::{BlockHistoryCache, ChainStatsCache},
    chain::ChainState,
    config::AppConfig,
    market::{CoinpaprikaClient, MarketDataProvider},
    rpc::{DaemonClient, DaemonRpc},
};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Configuration validation failed: {0}")]
    ConfigValidation(String),

    #[error("Runtime initialization failed: {0}")]
    Initialization(String),
}

/// Configures and starts an [`ExplorerRuntime`].
///
/// The daemon client and market provider are built from the configuration unless supplied
/// explicitly, which is how tests substitute in-memory implementations.
pub struct ExplorerRuntimeBuilder {
    config: Option<AppConfig>,
    daemon: Option<Arc<dyn DaemonRpc>>,
    market: Option<Option<Arc<dyn MarketDataProvider>>>,
    shutdown_channel_capacity: usize,
}

impl Default for ExplorerRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorerRuntimeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self { config: None, daemon: None, market: None, shutdown_channel_capacity: 16 }
    }

    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Uses `daemon` instead of a [`DaemonClient`] built from `config.daemon`.
    #[must_use]
    pub fn with_daemon(mut self, daemon: Arc<dyn DaemonRpc>) -> Self {
        self.daemon = Some(daemon);
        self
    }

    /// Uses `market` instead of a provider built from `config.market`. `None` disables market
    /// data regardless of configuration.
    #[must_use]
    pub fn with_market_provider(mut self, market: Option<Arc<dyn MarketDataProvider>>) -> Self {
        self.market = Some(market);
        self
    }

    #[must_use]
    pub fn with_shutdown_channel_capacity(mut self, capacity: usize) -> Self {
        self.shutdown_channel_capacity = capacity;
        self
    }

    /// Validates configuration, builds the components and spawns both refresh tasks.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError`] if no configuration was provided, it fails validation, or an
    /// HTTP client cannot be built.
    pub fn build(self) -> Result<ExplorerRuntime, RuntimeError> {
        let config = self.config.ok_or_else(|| {
            RuntimeError::ConfigValidation("No configuration provided".to_string())
        })?;

        config.validate().map_err(RuntimeError::ConfigValidation)?;

        info!(
            daemon = %config.daemon.url,
            max_blocks = config.block_history.max_blocks,
            market_enabled = config.market.enabled,
            "Initializing explorer runtime"
        );

        let daemon: Arc<dyn DaemonRpc> = match self.daemon {
            Some(daemon) => daemon,
            None => Arc::new(
                DaemonClient::new(&config.daemon.url, config.daemon_http_config())
                    .map_err(|e| RuntimeError::Initialization(format!("Daemon client: {e}")))?,
            ),
        };
        debug!("Daemon client initialized");

        let market: Option<Arc<dyn MarketDataProvider>> = match self.market {
            Some(market) => market,
            None if config.market.enabled => Some(Arc::new(
                CoinpaprikaClient::new(
                    &config.market.base_url,
                    &config.market.ticker_id,
                    &config.market.quote_currency,
                    Duration::from_secs(config.market.timeout_seconds),
                )
                .map_err(|e| RuntimeError::Initialization(format!("Market client: {e}")))?,
            )),
            None => None,
        };
        debug!(enabled = market.is_some(), "Market provider initialized");

        let (shutdown_tx, _) = broadcast::channel::<()>(self.shutdown_channel_capacity);

        let chain_state = ChainState::new();

        let block_history = Arc::new(BlockHistoryCache::new(
            daemon.clone(),
            config.block_history.clone(),
            chain_state.clone(),
        ));
        debug!(
            delegates = block_history.delegates().len(),
            path = %config.block_history.delegates_path.display(),
            "Block history cache initialized"
        );

        let chain_stats = Arc::new(ChainStatsCache::new(
            daemon.clone(),
            market,
            config.chain_stats.clone(),
            config.chain.atomic_units_per_coin,
        ));
        debug!("Chain stats cache initialized");

        Ok(ExplorerRuntime::start(
            config,
            daemon,
            chain_state,
            block_history,
            chain_stats,
            shutdown_tx,
        ))
    }
}
