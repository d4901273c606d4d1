use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::rpc::RpcError;

/// Configuration for the daemon HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-request timeout (connect + response).
    pub request_timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Retries for connection failures and HTTP 5xx before giving up.
    pub max_retries: u32,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: 2,
        }
    }
}

/// Pooled HTTP client used to POST JSON-RPC payloads to the daemon.
///
/// Connection failures and server errors are retried with exponential backoff
/// (`100ms * 2^attempt`); everything else is returned to the caller immediately.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Sanitizes network errors so that URLs and addresses never reach logs or pages.
    fn sanitize_network_error(error: &reqwest::Error) -> String {
        if error.is_connect() {
            "connection refused or unreachable".to_string()
        } else if error.is_timeout() {
            "connection timed out".to_string()
        } else if error.is_request() {
            "request failed".to_string()
        } else if error.is_body() {
            "response body error".to_string()
        } else if error.is_decode() {
            "response decode error".to_string()
        } else {
            "network error".to_string()
        }
    }

    /// Creates a new HTTP client with the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to build.
    pub fn with_config(config: HttpClientConfig) -> Result<Self, RpcError> {
        let client = ClientBuilder::new()
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .use_rustls_tls()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("explorer/", env!("CARGO_PKG_VERSION")))
            .tcp_keepalive(Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| {
                tracing::error!(error = %e, "failed to build http client");
                RpcError::ConnectionFailed(format!("HTTP client build failed: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Sends an HTTP POST with a JSON body and returns the raw response body.
    ///
    /// # Errors
    ///
    /// - [`RpcError::Timeout`] if the request times out after all retries
    /// - [`RpcError::HttpError`] for non-success HTTP status codes
    /// - [`RpcError::ConnectionFailed`] for other network-related failures
    pub async fn post_json(
        &self,
        url: &str,
        body: bytes::Bytes,
    ) -> Result<bytes::Bytes, RpcError> {
        let mut retries = 0;

        loop {
            let result = self
                .client
                .post(url)
                .header("content-type", "application/json")
                .body(body.clone())
                .send()
                .await;

            match result {
                Ok(response) => {
                    if response.status().is_success() {
                        return response.bytes().await.map_err(|e| {
                            RpcError::ConnectionFailed(Self::sanitize_network_error(&e))
                        });
                    } else if response.status().is_server_error() &&
                        retries < self.config.max_retries
                    {
                        retries += 1;
                        tokio::time::sleep(Duration::from_millis(100 * (1 << retries))).await;
                        continue;
                    }

                    let status = response.status().as_u16();
                    let raw_text = response.text().await.unwrap_or_default();
                    let sanitized_text = if raw_text.len() > 256 {
                        let cut =
                            (0..=256).rev().find(|&i| raw_text.is_char_boundary(i)).unwrap_or(0);
                        format!("{}... (truncated)", &raw_text[..cut])
                    } else {
                        raw_text
                    };
                    tracing::trace!(status = status, "http request failed");
                    return Err(RpcError::HttpError(status, sanitized_text));
                }
                Err(e) if retries < self.config.max_retries && !e.is_timeout() => {
                    retries += 1;
                    tracing::trace!(attempt = retries, "retrying daemon request");
                    tokio::time::sleep(Duration::from_millis(100 * (1 << retries))).await;
                }
                Err(e) => {
                    if e.is_timeout() {
                        return Err(RpcError::Timeout);
                    }
                    return Err(RpcError::ConnectionFailed(Self::sanitize_network_error(&e)));
                }
            }
        }
    }
}
