//! Backup repository ports

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::value_objects::RepositoryRegistration;

/// Settings of a backup repository
pub trait BackupRepositorySettings: Send + Sync {
    /// Repository type (e.g. `s3`)
    fn repository_type(&self) -> &str;

    /// Name the repository is registered under
    fn repository_name(&self) -> &str;

    /// Bucket holding the backups
    fn bucket(&self) -> &str;

    /// Key prefix inside the bucket
    fn base_path(&self) -> &str;

    /// Region of the bucket
    fn region(&self) -> &str;

    /// Type-specific settings body sent on registration
    fn to_settings(&self) -> serde_json::Value;
}

/// A backup repository the data node snapshots into
pub trait BackupRepository: Send + Sync {
    /// Repository type (e.g. `s3`)
    fn repository_type(&self) -> &str;

    /// Register the repository if needed; later calls return the same registration
    fn ensure_registered(&self) -> Result<RepositoryRegistration>;

    /// Name of the snapshot taken at `at`
    fn snapshot_name(&self, at: DateTime<Utc>) -> String;
}
