//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{
    BackupConfig, ClusterConfig, CredentialsConfig, DiscoveryConfig, LoggingConfig, ServerConfig,
};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Identity of the local node and its cluster
    #[serde(default)]
    pub cluster: ClusterConfig,
    /// Statically configured cloud credentials
    #[serde(default)]
    pub credentials: CredentialsConfig,
    /// Snapshot backups
    #[serde(default)]
    pub backup: BackupConfig,
    /// Peer discovery
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// HTTP server and REST mount
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
