use thiserror::Error;

/// Errors that can occur when calling the daemon's JSON-RPC interface.
///
/// Refresh loops treat every variant as a failed cycle: the error is logged, cached state is
/// left untouched, and the next cycle retries after a backoff. [`RpcError::is_transient`]
/// separates network-level failures (expected to clear on their own) from well-formed daemon
/// rejections and malformed payloads, which the request-path handlers map to different HTTP
/// statuses.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RpcError {
    /// Request exceeded the configured timeout duration.
    #[error("Request timeout")]
    Timeout,

    /// Failed to reach the daemon (refused, unreachable, reset).
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP-level error (non-2xx status code).
    ///
    /// First field is the HTTP status code, second is the (truncated) body.
    #[error("HTTP error: {0}")]
    HttpError(u16, String),

    /// Well-formed JSON-RPC error returned by the daemon (unknown height, bad address, ...).
    #[error("Daemon error {code}: {message}")]
    Daemon { code: i32, message: String },

    /// Response could not be parsed or did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request could not be built or serialized.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RpcError {
    /// Returns `true` if this error comes from the transport rather than from the daemon.
    ///
    /// Transient errors include timeouts, connection failures, HTTP 5xx and HTTP 429.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout | Self::ConnectionFailed(_) => true,
            Self::HttpError(status, _) => (500..=599).contains(status) || *status == 429,
            _ => false,
        }
    }

    /// Returns `true` if the daemon answered with a well-formed JSON-RPC error.
    #[must_use]
    pub fn is_daemon_error(&self) -> bool {
        matches!(self, Self::Daemon { .. })
    }
}
