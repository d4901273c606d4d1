//! Coinpaprika ticker mock.

use mockito::{Mock, Server, ServerGuard};
use serde_json::json;

pub struct MarketMockBuilder {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

impl MarketMockBuilder {
    pub async fn new() -> Self {
        Self { server: Server::new_async().await, mocks: Vec::new() }
    }

    #[must_use]
    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Mocks `GET /v1/tickers/{ticker_id}` with a USD quote.
    pub fn mock_ticker(&mut self, ticker_id: &str, price: f64, change_24h_pct: f64) -> &mut Self {
        let mock = self
            .server
            .mock("GET", format!("/v1/tickers/{ticker_id}").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": ticker_id,
                    "quotes": {
                        "USD": { "price": price, "percent_change_24h": change_24h_pct }
                    }
                })
                .to_string(),
            )
            .create();

        self.mocks.push(mock);
        self
    }

    /// Mocks a non-200 answer for `ticker_id`.
    pub fn mock_status(&mut self, ticker_id: &str, status: usize) -> &mut Self {
        let mock = self
            .server
            .mock("GET", format!("/v1/tickers/{ticker_id}").as_str())
            .with_status(status)
            .with_body("unavailable")
            .create();

        self.mocks.push(mock);
        self
    }
}
