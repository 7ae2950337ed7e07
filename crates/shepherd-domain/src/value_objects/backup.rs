//! Backup repository value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of registering a backup repository with the data node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRegistration {
    /// Repository name
    pub name: String,
    /// Repository type (e.g. `s3`)
    pub repository_type: String,
    /// Type-specific settings body
    pub settings: serde_json::Value,
    /// When the registration was produced
    pub registered_at: DateTime<Utc>,
}
