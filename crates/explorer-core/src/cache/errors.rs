use thiserror::Error;

use crate::{market::MarketError, rpc::RpcError};

/// Failure of a single refresh cycle. The cycle is aborted and cached state is left untouched.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("daemon request failed: {0}")]
    Rpc(#[from] RpcError),

    #[error("market data request failed: {0}")]
    Market(#[from] MarketError),

    /// The daemon returned a block for a different height than requested.
    #[error("requested block {requested}, daemon returned {returned}")]
    UnexpectedBlock { requested: u64, returned: u64 },
}

impl RefreshError {
    /// Returns `true` for network-level failures expected to clear on their own.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Rpc(e) => e.is_transient(),
            Self::Market(e) => matches!(e, MarketError::Timeout | MarketError::Transport(_)),
            Self::UnexpectedBlock { .. } => false,
        }
    }
}

/// Failure reading or writing the delegate statistics file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("delegate file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("delegate file encoding failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
