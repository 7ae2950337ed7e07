//! Backup configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Snapshot backup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Scheduled snapshots enabled
    pub enabled: bool,
    /// Bucket receiving the snapshots
    pub bucket: String,
    /// Key prefix inside the bucket
    pub base_path: String,
    /// Name the repository is registered under
    pub repository_name: String,
    /// Snapshot interval in seconds
    pub snapshot_interval_secs: u64,
}

/// Returns default backup configuration with:
/// - Backups disabled
/// - No bucket
/// - Hourly snapshots
impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bucket: String::new(),
            base_path: DEFAULT_BACKUP_BASE_PATH.to_string(),
            repository_name: DEFAULT_BACKUP_REPOSITORY_NAME.to_string(),
            snapshot_interval_secs: DEFAULT_SNAPSHOT_INTERVAL_SECS,
        }
    }
}
