//! Application configuration with layered loading.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//!
//! 1. **Compiled defaults**: struct `Default` implementations and `set_default` calls
//! 2. **Config file**: TOML file named by the `EXPLORER_CONFIG` env var
//!    (default `config/config.toml`, optional)
//! 3. **Environment variables**: `EXPLORER__SECTION__FIELD` overrides
//!
//! # Configuration Sections
//!
//! - [`ServerConfig`]: HTTP bind address and request timeout
//! - [`DaemonConfig`]: daemon RPC endpoint
//! - [`MarketConfig`]: market-data provider
//! - [`BlockHistoryConfig`]: history bound, poll cadence, delegate snapshot path
//! - [`ChainStatsConfig`]: statistics refresh cadence
//! - [`ChainConfig`]: coin denomination
//! - [`LoggingConfig`]: log level and format
//!
//! # Example
//!
//! ```toml
//! [daemon]
//! url = "http://127.0.0.1:6311"
//!
//! [block_history]
//! max_blocks = 50
//! delegates_path = "data/delegates.json"
//!
//! [market]
//! enabled = true
//! ticker_id = "vrl-virel"
//! ```

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::rpc::HttpClientConfig;

/// HTTP server configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// IP address to bind the server to. Defaults to `127.0.0.1`.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port number to listen on. Must be greater than 0. Defaults to `8080`.
    pub bind_port: u16,

    /// Upper bound on a single API request, daemon round-trips included. Defaults to `15`.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    15
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Base URL of the daemon; `/json_rpc` is appended.
    pub url: String,

    #[serde(default = "default_daemon_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retries for connection failures and 5xx responses.
    #[serde(default = "default_daemon_max_retries")]
    pub max_retries: u32,
}

fn default_daemon_timeout_seconds() -> u64 {
    5
}

fn default_daemon_max_retries() -> u32 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_market_base_url")]
    pub base_url: String,

    /// Provider-specific ticker identifier.
    pub ticker_id: String,

    #[serde(default = "default_quote_currency")]
    pub quote_currency: String,

    #[serde(default = "default_market_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_true() -> bool {
    true
}

fn default_market_base_url() -> String {
    "https://api.coinpaprika.com".to_string()
}

fn default_quote_currency() -> String {
    "USD".to_string()
}

fn default_market_timeout_seconds() -> u64 {
    10
}

/// Block history cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockHistoryConfig {
    /// Number of most recent blocks kept in memory. Defaults to `50`.
    #[serde(default = "default_max_blocks")]
    pub max_blocks: usize,

    /// Sleep between cycles once the cache has caught up with the daemon.
    #[serde(default = "default_idle_poll_ms")]
    pub idle_poll_ms: u64,

    /// Sleep after a failed cycle.
    #[serde(default = "default_error_backoff_ms")]
    pub error_backoff_ms: u64,

    /// JSON snapshot of delegate statistics.
    #[serde(default = "default_delegates_path")]
    pub delegates_path: PathBuf,
}

fn default_max_blocks() -> usize {
    50
}

fn default_idle_poll_ms() -> u64 {
    2_000
}

fn default_error_backoff_ms() -> u64 {
    5_000
}

fn default_delegates_path() -> PathBuf {
    PathBuf::from("delegates.json")
}

impl BlockHistoryConfig {
    #[must_use]
    pub fn idle_poll(&self) -> Duration {
        Duration::from_millis(self.idle_poll_ms)
    }

    #[must_use]
    pub fn error_backoff(&self) -> Duration {
        Duration::from_millis(self.error_backoff_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainStatsConfig {
    #[serde(default = "default_stats_interval_seconds")]
    pub refresh_interval_seconds: u64,
}

fn default_stats_interval_seconds() -> u64 {
    60
}

impl ChainStatsConfig {
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Atomic units in one whole coin.
    #[serde(default = "default_atomic_units_per_coin")]
    pub atomic_units_per_coin: u64,

    /// Ticker symbol used when formatting amounts.
    #[serde(default = "default_coin_symbol")]
    pub coin_symbol: String,
}

fn default_atomic_units_per_coin() -> u64 {
    1_000_000_000
}

fn default_coin_symbol() -> String {
    "VRL".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// `"pretty"` or `"json"`.
    pub format: String,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub daemon: DaemonConfig,

    #[serde(default)]
    pub market: MarketConfig,

    #[serde(default)]
    pub block_history: BlockHistoryConfig,

    #[serde(default)]
    pub chain_stats: ChainStatsConfig,

    #[serde(default)]
    pub chain: ChainConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: 8080,
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:6311".to_string(),
            timeout_seconds: default_daemon_timeout_seconds(),
            max_retries: default_daemon_max_retries(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_market_base_url(),
            ticker_id: "vrl-virel".to_string(),
            quote_currency: default_quote_currency(),
            timeout_seconds: default_market_timeout_seconds(),
        }
    }
}

impl Default for BlockHistoryConfig {
    fn default() -> Self {
        Self {
            max_blocks: default_max_blocks(),
            idle_poll_ms: default_idle_poll_ms(),
            error_backoff_ms: default_error_backoff_ms(),
            delegates_path: default_delegates_path(),
        }
    }
}

impl Default for ChainStatsConfig {
    fn default() -> Self {
        Self { refresh_interval_seconds: default_stats_interval_seconds() }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            atomic_units_per_coin: default_atomic_units_per_coin(),
            coin_symbol: default_coin_symbol(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file with environment variable overrides.
    ///
    /// Environment variables with the `EXPLORER__` prefix can override any configuration
    /// value, using `__` between nested fields (e.g. `EXPLORER__DAEMON__URL=http://node:6311`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or deserialized.
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_builder = Config::builder()
            .set_default("server.bind_address", default_bind_address())?
            .set_default("server.bind_port", 8080)?
            .set_default("server.request_timeout_seconds", default_request_timeout_seconds())?
            .set_default("daemon.url", "http://127.0.0.1:6311")?
            .set_default("market.ticker_id", "vrl-virel")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name(&config_path.as_ref().to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("EXPLORER").separator("__"))
            .build()?;

        config_builder.try_deserialize()
    }

    /// Loads configuration from `config/config.toml`, or from the path in `EXPLORER_CONFIG`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("EXPLORER_CONFIG").unwrap_or_else(|_| "config/config.toml".to_string());
        Self::from_file(&config_path)
    }

    /// Returns the parsed socket address for the HTTP server.
    ///
    /// # Errors
    ///
    /// Returns an error string if the address cannot be parsed into a valid [`SocketAddr`].
    ///
    /// [`SocketAddr`]: std::net::SocketAddr
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, String> {
        format!("{}:{}", self.server.bind_address, self.server.bind_port)
            .parse()
            .map_err(|_| {
                format!(
                    "Invalid socket address: {}:{}",
                    self.server.bind_address, self.server.bind_port
                )
            })
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_seconds)
    }

    /// Transport settings for the daemon client.
    #[must_use]
    pub fn daemon_http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            request_timeout: Duration::from_secs(self.daemon.timeout_seconds),
            max_retries: self.daemon.max_retries,
            ..HttpClientConfig::default()
        }
    }

    /// Validates the configuration for correctness and consistency.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if !self.daemon.url.starts_with("http") {
            return Err(format!("Invalid daemon URL: {}", self.daemon.url));
        }

        if self.daemon.timeout_seconds == 0 {
            return Err("Daemon timeout must be greater than 0".to_string());
        }

        if self.market.enabled {
            if !self.market.base_url.starts_with("http") {
                return Err(format!("Invalid market base URL: {}", self.market.base_url));
            }
            if self.market.ticker_id.is_empty() {
                return Err("Market ticker id must not be empty".to_string());
            }
            if self.market.timeout_seconds == 0 {
                return Err("Market timeout must be greater than 0".to_string());
            }
        }

        if self.block_history.max_blocks == 0 {
            return Err("Block history size must be greater than 0".to_string());
        }

        if self.block_history.idle_poll_ms == 0 || self.block_history.error_backoff_ms == 0 {
            return Err("Block history poll intervals must be greater than 0".to_string());
        }

        if self.chain_stats.refresh_interval_seconds == 0 {
            return Err("Chain stats refresh interval must be greater than 0".to_string());
        }

        if self.chain.atomic_units_per_coin == 0 {
            return Err("Atomic units per coin must be greater than 0".to_string());
        }

        if self.server.bind_port == 0 {
            return Err("Bind port must be greater than 0".to_string());
        }

        if self.server.request_timeout_seconds == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }

        if !["json", "pretty"].contains(&self.logging.format.as_str()) {
            return Err("Logging format must be 'json' or 'pretty'".to_string());
        }

        Ok(())
    }
}
