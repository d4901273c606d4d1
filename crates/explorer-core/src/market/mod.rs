//! External market-data provider.
//!
//! The chain statistics cache pulls the token's USD price and 24h change from a public ticker
//! API and combines it with the daemon's circulating supply into a [`MarketSnapshot`].

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};
use thiserror::Error;

/// Errors returned by a [`MarketDataProvider`].
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Market request timeout")]
    Timeout,

    #[error("Market transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-200 status.
    #[error("Market provider returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Body could not be decoded or lacks the requested quote currency.
    #[error("Malformed market response: {0}")]
    Malformed(String),
}

/// Price quote for the token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub price_usd: f64,
    pub change_24h_pct: f64,
}

/// Market data derived from a [`Ticker`] and the circulating supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub price_usd: f64,
    pub change_24h_pct: f64,
    /// Circulating supply in whole coins.
    pub circulating_supply: f64,
    pub market_cap_usd: f64,
}

impl MarketSnapshot {
    /// Builds a snapshot from a ticker and a supply given in atomic units.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_ticker(ticker: Ticker, supply_atomic: u64, atomic_units_per_coin: u64) -> Self {
        let circulating_supply = supply_atomic as f64 / atomic_units_per_coin.max(1) as f64;
        Self {
            price_usd: ticker.price_usd,
            change_24h_pct: ticker.change_24h_pct,
            circulating_supply,
            market_cap_usd: ticker.price_usd * circulating_supply,
        }
    }

    /// Formats the 24h change with an explicit sign, e.g. `+1.23%` or `-4.50%`.
    #[must_use]
    pub fn change_display(&self) -> String {
        if self.change_24h_pct >= 0.0 {
            format!("+{:.2}%", self.change_24h_pct)
        } else {
            format!("{:.2}%", self.change_24h_pct)
        }
    }
}

/// Source of token price quotes.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn get_ticker(&self) -> Result<Ticker, MarketError>;
}

#[derive(Debug, Deserialize)]
struct CoinpaprikaTicker {
    quotes: HashMap<String, CoinpaprikaQuote>,
}

#[derive(Debug, Deserialize)]
struct CoinpaprikaQuote {
    price: f64,
    #[serde(default)]
    percent_change_24h: f64,
}

/// Ticker client for the Coinpaprika public API (`/v1/tickers/{id}`).
#[derive(Debug, Clone)]
pub struct CoinpaprikaClient {
    client: Client,
    url: String,
    quote_currency: String,
}

impl CoinpaprikaClient {
    /// Creates a client for `ticker_id` (e.g. `btc-bitcoin`) quoted in `quote_currency`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to build.
    pub fn new(
        base_url: &str,
        ticker_id: &str,
        quote_currency: &str,
        timeout: Duration,
    ) -> Result<Self, MarketError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(2)
            .use_rustls_tls()
            .build()
            .map_err(|e| MarketError::Transport(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            url: format!("{}/v1/tickers/{ticker_id}", base_url.trim_end_matches('/')),
            quote_currency: quote_currency.to_uppercase(),
        })
    }
}

#[async_trait]
impl MarketDataProvider for CoinpaprikaClient {
    async fn get_ticker(&self) -> Result<Ticker, MarketError> {
        let response = self
            .client
            .get(&self.url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketError::Timeout
                } else {
                    MarketError::Transport(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| MarketError::Transport(e.without_url().to_string()))?;

        if status != StatusCode::OK {
            let text = String::from_utf8_lossy(&body);
            let text: String = text.chars().take(256).collect();
            return Err(MarketError::HttpStatus { status: status.as_u16(), body: text });
        }

        let ticker: CoinpaprikaTicker =
            serde_json::from_slice(&body).map_err(|e| MarketError::Malformed(e.to_string()))?;

        let quote = ticker.quotes.get(&self.quote_currency).ok_or_else(|| {
            MarketError::Malformed(format!("missing {} quote", self.quote_currency))
        })?;

        Ok(Ticker { price_usd: quote.price, change_24h_pct: quote.percent_change_24h })
    }
}
