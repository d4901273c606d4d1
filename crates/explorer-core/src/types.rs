//! Wire types for the daemon JSON-RPC interface.
//!
//! # Type Categories
//!
//! ## JSON-RPC Envelope
//! - [`JsonRpcRequest`], [`JsonRpcResponse`], [`JsonRpcError`]: protocol framing shared by every
//!   daemon call
//!
//! ## Endpoint Responses
//! Each daemon endpoint has its own response type. Types are never reused under a different
//! name for a different endpoint; where a page needs data from two endpoints it holds both.
//!
//! - [`ChainInfo`]: `get_info`
//! - [`BlockResponse`]: `get_block_by_height` / `get_block_by_hash`
//! - [`DelegateInfo`]: `get_delegate`
//! - [`RichListResponse`]: `get_rich_list`
//! - [`TransactionResponse`]: `get_transaction`
//! - [`AddressInfo`]: `get_address`

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// JSON-RPC protocol version sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: Cow<'static, str>,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    pub id: u64,
}

impl JsonRpcRequest {
    /// Creates a new request without allocating the version string.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<serde_json::Value>, id: u64) -> Self {
        Self { jsonrpc: Cow::Borrowed(JSONRPC_VERSION), method: method.into(), params, id }
    }
}

/// JSON-RPC 2.0 response envelope, generic over the endpoint's result type.
///
/// A well-formed response carries either `result` or `error`. A response carrying neither is
/// treated as malformed by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse<T> {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
    #[serde(default)]
    pub id: serde_json::Value,
}

/// JSON-RPC 2.0 error object returned by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

/// Response of `get_info`: aggregate chain state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainInfo {
    /// Tip height: highest block the daemon knows about.
    pub height: u64,
    pub top_hash: String,
    /// Circulating supply in atomic units.
    pub circulating_supply: u64,
    pub max_supply: u64,
    pub difficulty: u64,
    pub mempool_size: u64,
    pub version: String,
}

/// Block header and body as reported by the daemon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Block {
    pub height: u64,
    /// Milliseconds since the unix epoch, as stamped by the producer.
    pub timestamp: u64,
    pub prev_hash: String,
    /// Producing delegate; `0` means the block names no delegate.
    pub delegate_id: u64,
    /// Hex-encoded stake signature. All zeroes when the delegate missed its slot.
    pub stake_signature: String,
    pub difficulty: u64,
    /// Transaction hashes included in the block.
    pub transactions: Vec<String>,
}

impl Block {
    /// Returns `true` if the stake signature is the well-known blank signature.
    #[must_use]
    pub fn has_blank_signature(&self) -> bool {
        is_blank_signature(&self.stake_signature)
    }
}

/// Returns `true` if `signature` is empty or consists solely of zero hex digits.
#[must_use]
pub fn is_blank_signature(signature: &str) -> bool {
    let digits = signature.strip_prefix("0x").unwrap_or(signature);
    digits.bytes().all(|b| b == b'0')
}

/// Response of `get_block_by_height` and `get_block_by_hash`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockResponse {
    pub hash: String,
    pub block: Block,
    /// Total newly minted reward, in atomic units.
    pub total_reward: u64,
    pub miner_reward: u64,
    pub governance_reward: u64,
    /// Address credited with the staking reward, if any.
    pub miner: Option<String>,
}

/// Response of `get_delegate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelegateInfo {
    pub id: u64,
    pub address: String,
    pub name: String,
    pub owner: String,
    /// Total stake delegated, in atomic units.
    pub total_amount: u64,
}

/// One ranked balance from the rich list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichListEntry {
    pub address: String,
    pub balance: u64,
}

/// Response of `get_rich_list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichListResponse {
    pub richest: Vec<RichListEntry>,
}

/// Response of `get_transaction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionResponse {
    pub sender: String,
    pub recipient: Recipient,
    pub amount: u64,
    pub fee: u64,
    /// Height of the including block, `0` while still in the mempool.
    pub height: u64,
    pub nonce: u64,
}

/// Response of `get_address`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressInfo {
    pub balance: u64,
    pub last_nonce: u64,
    pub last_incoming: u64,
    pub delegate_id: u64,
    pub total_staked: u64,
}

/// Transaction recipient, normalized to a single address.
///
/// The daemon reports the recipient either as a string or as an array (one entry per output).
/// Deserialization keeps the first string element of an array, the string itself for a scalar,
/// and an empty address for anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Recipient(pub String);

impl Recipient {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Recipient {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let address = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Array(items) => items
                .into_iter()
                .next()
                .and_then(|first| first.as_str().map(str::to_owned))
                .unwrap_or_default(),
            _ => String::new(),
        };
        Ok(Self(address))
    }
}
