//! Daemon RPC gateway.
//!
//! - [`DaemonRpc`]: the operations the explorer consumes from the daemon
//! - [`DaemonClient`]: JSON-RPC 2.0 over HTTP implementation
//! - [`RpcError`]: transport, daemon and decoding failures

pub mod client;
pub mod errors;
pub mod http_client;

pub use client::{DaemonClient, DaemonRpc};
pub use errors::RpcError;
pub use http_client::{HttpClient, HttpClientConfig};
