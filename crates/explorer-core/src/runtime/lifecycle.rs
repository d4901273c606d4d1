//! Runtime lifecycle: background refresh tasks and graceful shutdown.

use std::{sync::Arc, time::Duration};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, error, info, warn};

use super::builder::ExplorerRuntimeBuilder;
use crate::{
    cache::{BlockHistoryCache, ChainStatsCache},
    chain::ChainState,
    config::AppConfig,
    rpc::DaemonRpc,
};

/// Time allowed for each refresh task to observe the shutdown signal.
const TASK_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Owns the caches and their refresh tasks.
///
/// Request handlers read through [`block_history`](Self::block_history) and
/// [`chain_stats`](Self::chain_stats); lookups that bypass the caches go through
/// [`daemon`](Self::daemon).
pub struct ExplorerRuntime {
    config: AppConfig,
    daemon: Arc<dyn DaemonRpc>,
    chain_state: ChainState,
    block_history: Arc<BlockHistoryCache>,
    chain_stats: Arc<ChainStatsCache>,
    shutdown_tx: broadcast::Sender<()>,
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl ExplorerRuntime {
    #[must_use]
    pub fn builder() -> ExplorerRuntimeBuilder {
        ExplorerRuntimeBuilder::new()
    }

    pub(super) fn start(
        config: AppConfig,
        daemon: Arc<dyn DaemonRpc>,
        chain_state: ChainState,
        block_history: Arc<BlockHistoryCache>,
        chain_stats: Arc<ChainStatsCache>,
        shutdown_tx: broadcast::Sender<()>,
    ) -> Self {
        let tasks = vec![
            ("block_history", tokio::spawn(block_history.clone().run(shutdown_tx.subscribe()))),
            ("chain_stats", tokio::spawn(chain_stats.clone().run(shutdown_tx.subscribe()))),
        ];
        debug!("Refresh tasks started");

        Self {
            config,
            daemon,
            chain_state,
            block_history,
            chain_stats,
            shutdown_tx,
            tasks,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn daemon(&self) -> &Arc<dyn DaemonRpc> {
        &self.daemon
    }

    #[must_use]
    pub fn chain_state(&self) -> &ChainState {
        &self.chain_state
    }

    #[must_use]
    pub fn block_history(&self) -> &Arc<BlockHistoryCache> {
        &self.block_history
    }

    #[must_use]
    pub fn chain_stats(&self) -> &Arc<ChainStatsCache> {
        &self.chain_stats
    }

    /// Creates a new shutdown receiver for external shutdown coordination.
    #[must_use]
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signals both refresh tasks and waits for them to exit.
    ///
    /// Consumes the runtime; a task that does not stop within a few seconds is aborted.
    pub async fn shutdown(self) {
        info!("Initiating explorer runtime shutdown");
        if let Err(e) = self.shutdown_tx.send(()) {
            warn!(error = %e, "Failed to send shutdown signal (no receivers)");
        }

        for (name, mut task) in self.tasks {
            match tokio::time::timeout(TASK_SHUTDOWN_TIMEOUT, &mut task).await {
                Ok(Ok(())) => debug!(task = name, "Refresh task completed"),
                Ok(Err(e)) if e.is_cancelled() => debug!(task = name, "Refresh task cancelled"),
                Ok(Err(e)) => error!(task = name, error = %e, "Refresh task failed"),
                Err(_) => {
                    warn!(task = name, "Refresh task did not stop in time, aborting");
                    task.abort();
                }
            }
        }

        info!("Explorer runtime shutdown complete");
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    let _ = assert_send::<ExplorerRuntime>;
    let _ = assert_sync::<ExplorerRuntime>;
};
