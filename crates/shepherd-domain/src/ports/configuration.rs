//! Configuration provider port

use std::time::Duration;

/// Read-only access to the sidecar settings
pub trait ConfigurationProvider: Send + Sync {
    /// Cluster application name
    fn app_name(&self) -> &str;

    /// Cloud region the node runs in
    fn region(&self) -> &str;

    /// Rack or availability zone of the node
    fn rack(&self) -> &str;

    /// Unique identifier of the local node
    fn instance_id(&self) -> &str;

    /// Host name of the local node
    fn hostname(&self) -> &str;

    /// IP address of the local node
    fn host_ip(&self) -> &str;

    /// Statically configured access key, if any
    fn access_key_id(&self) -> Option<&str>;

    /// Statically configured secret key, if any
    fn secret_access_key(&self) -> Option<&str>;

    /// Statically configured session token, if any
    fn session_token(&self) -> Option<&str>;

    /// Whether scheduled snapshots are enabled
    fn is_backup_enabled(&self) -> bool;

    /// Bucket holding backups
    fn backup_bucket(&self) -> &str;

    /// Key prefix inside the bucket
    fn backup_base_path(&self) -> &str;

    /// Name the backup repository is registered under
    fn backup_repository_name(&self) -> &str;

    /// Time between two scheduled snapshots
    fn snapshot_interval(&self) -> Duration;

    /// Base URL of the discovery service, if discovery is used
    fn discovery_url(&self) -> Option<&str>;

    /// Peers used when no discovery service is configured
    fn static_peers(&self) -> &[String];

    /// Time between two peer list refreshes
    fn host_refresh_interval(&self) -> Duration;

    /// Timeout applied to discovery requests
    fn discovery_timeout(&self) -> Duration;
}
