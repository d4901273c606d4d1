use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

use super::{
    http_client::{HttpClient, HttpClientConfig},
    RpcError,
};
use crate::types::{
    AddressInfo, BlockResponse, ChainInfo, DelegateInfo, JsonRpcRequest, JsonRpcResponse,
    RichListResponse, TransactionResponse,
};

/// Request/response operations the explorer needs from the daemon.
///
/// The caches only ever talk to the daemon through this trait, which keeps them testable
/// against in-memory fakes and keeps the transport swappable.
#[async_trait]
pub trait DaemonRpc: Send + Sync {
    /// Aggregate chain state: tip height, circulating supply.
    async fn get_chain_info(&self) -> Result<ChainInfo, RpcError>;

    async fn get_block_by_height(&self, height: u64) -> Result<BlockResponse, RpcError>;

    /// `hash` is the 64-character hex block hash.
    async fn get_block_by_hash(&self, hash: &str) -> Result<BlockResponse, RpcError>;

    async fn get_delegate(&self, address: &str) -> Result<DelegateInfo, RpcError>;

    /// Ranked balances, richest first.
    async fn get_rich_list(&self) -> Result<RichListResponse, RpcError>;

    async fn get_transaction(&self, txid: &str) -> Result<TransactionResponse, RpcError>;

    async fn get_address(&self, address: &str) -> Result<AddressInfo, RpcError>;
}

/// JSON-RPC client for the daemon's `/json_rpc` endpoint.
#[derive(Debug)]
pub struct DaemonClient {
    endpoint: String,
    http: HttpClient,
    next_id: AtomicU64,
}

impl DaemonClient {
    /// Creates a client for the daemon at `base_url` (e.g. `http://127.0.0.1:6311`).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(base_url: &str, config: HttpClientConfig) -> Result<Self, RpcError> {
        let endpoint = format!("{}/json_rpc", base_url.trim_end_matches('/'));
        Ok(Self { endpoint, http: HttpClient::with_config(config)?, next_id: AtomicU64::new(0) })
    }

    /// Returns the full JSON-RPC endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Performs one JSON-RPC call and decodes its `result` into `T`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Option<Value>,
    ) -> Result<T, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(method, params, id);
        let body = serde_json::to_vec(&request)
            .map_err(|e| RpcError::InvalidRequest(format!("Failed to serialize request: {e}")))?;

        tracing::trace!(method = method, id = id, "daemon request");

        let response_bytes = self.http.post_json(&self.endpoint, bytes::Bytes::from(body)).await?;

        let response: JsonRpcResponse<T> = serde_json::from_slice(&response_bytes)
            .map_err(|e| RpcError::InvalidResponse(format!("{method}: {e}")))?;

        if let Some(error) = response.error {
            return Err(RpcError::Daemon { code: error.code, message: error.message });
        }

        response
            .result
            .ok_or_else(|| RpcError::InvalidResponse(format!("{method}: missing result")))
    }
}

#[async_trait]
impl DaemonRpc for DaemonClient {
    async fn get_chain_info(&self) -> Result<ChainInfo, RpcError> {
        self.call("get_info", None).await
    }

    async fn get_block_by_height(&self, height: u64) -> Result<BlockResponse, RpcError> {
        self.call("get_block_by_height", Some(json!({ "height": height }))).await
    }

    async fn get_block_by_hash(&self, hash: &str) -> Result<BlockResponse, RpcError> {
        self.call("get_block_by_hash", Some(json!({ "hash": hash }))).await
    }

    async fn get_delegate(&self, address: &str) -> Result<DelegateInfo, RpcError> {
        self.call("get_delegate", Some(json!({ "delegate_address": address }))).await
    }

    async fn get_rich_list(&self) -> Result<RichListResponse, RpcError> {
        self.call("rich_list", None).await
    }

    async fn get_transaction(&self, txid: &str) -> Result<TransactionResponse, RpcError> {
        self.call("get_transaction", Some(json!({ "txid": txid }))).await
    }

    async fn get_address(&self, address: &str) -> Result<AddressInfo, RpcError> {
        self.call("get_address", Some(json!({ "address": address }))).await
    }
}
