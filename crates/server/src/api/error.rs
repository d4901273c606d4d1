//! Error responses for the read API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use explorer_core::rpc::RpcError;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Path or query value that cannot name a block, transaction or account.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("daemon request failed: {0}")]
    Daemon(#[from] RpcError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// Maps a failed lookup of `what`.
    ///
    /// The daemon answers lookups of unknown heights, hashes and addresses with a JSON-RPC
    /// error, so a well-formed daemon error means the item does not exist.
    pub fn lookup(error: RpcError, what: impl Into<String>) -> Self {
        if error.is_daemon_error() {
            Self::NotFound(what.into())
        } else {
            Self::Daemon(error)
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Daemon(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, "Daemon lookup failed");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
