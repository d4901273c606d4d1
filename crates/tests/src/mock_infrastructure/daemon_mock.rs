//! JSON-RPC daemon mock.

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};

/// Stake signature of a block whose delegate missed its slot.
#[must_use]
pub fn blank_signature() -> String {
    "0".repeat(128)
}

/// Mock daemon backed by a mockito server.
///
/// Requests are matched on method and params, so mocks for different heights never overlap.
pub struct DaemonMockBuilder {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

impl DaemonMockBuilder {
    pub async fn new() -> Self {
        Self { server: Server::new_async().await, mocks: Vec::new() }
    }

    /// Base URL to configure the daemon client with.
    #[must_use]
    pub fn url(&self) -> String {
        self.server.url()
    }

    fn mock_result(&mut self, body: Value, result: &Value) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/json_rpc")
            .match_body(Matcher::PartialJson(body))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "jsonrpc": "2.0", "id": 0, "result": result }).to_string())
            .create();

        self.mocks.push(mock);
        self
    }

    /// Mocks `get_info` reporting `height` as the tip.
    pub fn mock_chain_info(&mut self, height: u64, circulating_supply: u64) -> &mut Self {
        self.mock_result(
            json!({ "method": "get_info" }),
            &json!({
                "height": height,
                "top_hash": format!("{height:064x}"),
                "circulating_supply": circulating_supply,
                "max_supply": circulating_supply * 2,
                "difficulty": 1,
                "mempool_size": 0,
                "version": "0.0.0-mock"
            }),
        )
    }

    /// Mocks `get_block_by_height` and `get_block_by_hash` for one block built with
    /// [`BlockResponseBuilder`].
    pub fn mock_block(&mut self, block: &Value) -> &mut Self {
        let height = block["block"]["height"].clone();
        let hash = block["hash"].clone();
        self.mock_result(
            json!({ "method": "get_block_by_height", "params": { "height": height } }),
            block,
        );
        self.mock_result(
            json!({ "method": "get_block_by_hash", "params": { "hash": hash } }),
            block,
        )
    }

    /// Mocks the rich list with `(address, balance)` entries.
    pub fn mock_rich_list(&mut self, entries: &[(&str, u64)]) -> &mut Self {
        let richest: Vec<Value> = entries
            .iter()
            .map(|(address, balance)| json!({ "address": address, "balance": balance }))
            .collect();
        self.mock_result(json!({ "method": "rich_list" }), &json!({ "richest": richest }))
    }

    /// Mocks a JSON-RPC error for every call of `method`.
    pub fn mock_rpc_error(&mut self, method: &str, code: i32, message: &str) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/json_rpc")
            .match_body(Matcher::PartialJson(json!({ "method": method })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "jsonrpc": "2.0",
                    "id": 0,
                    "error": { "code": code, "message": message }
                })
                .to_string(),
            )
            .create();

        self.mocks.push(mock);
        self
    }

    /// Mocks an HTTP 500 for every call of `method`.
    pub fn mock_server_error(&mut self, method: &str) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/json_rpc")
            .match_body(Matcher::PartialJson(json!({ "method": method })))
            .with_status(500)
            .with_body("Internal Server Error")
            .create();

        self.mocks.push(mock);
        self
    }
}

/// Builds `get_block_by_height` results.
pub struct BlockResponseBuilder {
    height: u64,
    timestamp: u64,
    delegate_id: u64,
    missed: bool,
    transactions: Vec<String>,
}

impl BlockResponseBuilder {
    #[must_use]
    pub fn new(height: u64) -> Self {
        Self {
            height,
            timestamp: 1_700_000_000_000 + height * 10_000,
            delegate_id: 1,
            missed: false,
            transactions: Vec::new(),
        }
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn delegate(mut self, delegate_id: u64) -> Self {
        self.delegate_id = delegate_id;
        self
    }

    /// Gives the block the blank stake signature.
    #[must_use]
    pub fn missed(mut self) -> Self {
        self.missed = true;
        self
    }

    #[must_use]
    pub fn transaction(mut self, txid: &str) -> Self {
        self.transactions.push(txid.to_string());
        self
    }

    #[must_use]
    pub fn build(self) -> Value {
        let signature = if self.missed { blank_signature() } else { "ab".repeat(64) };
        json!({
            "hash": format!("{:064x}", self.height),
            "block": {
                "height": self.height,
                "timestamp": self.timestamp,
                "prev_hash": format!("{:064x}", self.height.saturating_sub(1)),
                "delegate_id": self.delegate_id,
                "stake_signature": signature,
                "difficulty": 1,
                "transactions": self.transactions
            },
            "total_reward": 2_000_000_000_u64,
            "miner_reward": 1_800_000_000_u64,
            "governance_reward": 200_000_000_u64,
            "miner": "vrl1miner"
        })
    }
}
