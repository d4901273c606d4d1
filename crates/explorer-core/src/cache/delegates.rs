//! Per-delegate uptime counters and their on-disk snapshot.

use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use super::errors::PersistenceError;

/// Staking statistics for one delegate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateRecord {
    pub id: u64,
    /// Height of the last block applied to this record.
    pub last_height: u64,
    pub blocks_staked: u64,
    pub blocks_missed: u64,
}

impl DelegateRecord {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self { id, last_height: 0, blocks_staked: 0, blocks_missed: 0 }
    }

    /// Counts a block produced at `height`. Returns `false` without touching the counters when
    /// `height` is not above the last applied height.
    pub fn apply(&mut self, height: u64, missed: bool) -> bool {
        if height <= self.last_height {
            return false;
        }
        if missed {
            self.blocks_missed += 1;
        } else {
            self.blocks_staked += 1;
        }
        self.last_height = height;
        true
    }

    /// Fraction of slots staked, in `[0, 1]`. A delegate with no observed slots reports 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn uptime(&self) -> f64 {
        let total = self.blocks_staked + self.blocks_missed;
        if total == 0 {
            return 0.0;
        }
        self.blocks_staked as f64 / total as f64
    }
}

/// JSON file holding an array of [`DelegateRecord`]s, sorted by id.
#[derive(Debug, Clone)]
pub struct DelegateStore {
    path: PathBuf,
}

impl DelegateStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot. A missing or unreadable file yields an empty map.
    #[must_use]
    pub fn load(&self) -> HashMap<u64, DelegateRecord> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no delegate snapshot, starting empty");
                return HashMap::new();
            }
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "failed to read delegate snapshot");
                return HashMap::new();
            }
        };

        match serde_json::from_slice::<Vec<DelegateRecord>>(&data) {
            Ok(records) => {
                info!(
                    path = %self.path.display(),
                    delegates = records.len(),
                    "loaded delegate snapshot"
                );
                records.into_iter().map(|r| (r.id, r)).collect()
            }
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "failed to parse delegate snapshot");
                HashMap::new()
            }
        }
    }

    /// Writes the snapshot to a temporary sibling and renames it over the target, so readers
    /// of the file never see a partial write.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if encoding, writing or renaming fails.
    pub async fn save(
        &self,
        records: &HashMap<u64, DelegateRecord>,
    ) -> Result<(), PersistenceError> {
        let mut sorted: Vec<DelegateRecord> = records.values().copied().collect();
        sorted.sort_unstable_by_key(|r| r.id);
        let data = serde_json::to_vec_pretty(&sorted)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &data).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        debug!(path = %self.path.display(), delegates = sorted.len(), "saved delegate snapshot");
        Ok(())
    }
}
