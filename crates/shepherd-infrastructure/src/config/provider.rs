//! Configuration provider backed by [`AppConfig`]

use std::sync::Arc;
use std::time::Duration;

use shepherd_domain::ports::ConfigurationProvider;

use super::AppConfig;

/// Read-only view of the loaded configuration
#[derive(Debug, Clone)]
pub struct SidecarConfiguration {
    config: Arc<AppConfig>,
}

impl SidecarConfiguration {
    /// Wrap a loaded configuration
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// The underlying configuration
    pub fn app_config(&self) -> &AppConfig {
        &self.config
    }
}

impl ConfigurationProvider for SidecarConfiguration {
    fn app_name(&self) -> &str {
        &self.config.cluster.app_name
    }

    fn region(&self) -> &str {
        &self.config.cluster.region
    }

    fn rack(&self) -> &str {
        &self.config.cluster.rack
    }

    fn instance_id(&self) -> &str {
        &self.config.cluster.instance_id
    }

    fn hostname(&self) -> &str {
        &self.config.cluster.hostname
    }

    fn host_ip(&self) -> &str {
        &self.config.cluster.host_ip
    }

    fn access_key_id(&self) -> Option<&str> {
        self.config.credentials.access_key_id.as_deref()
    }

    fn secret_access_key(&self) -> Option<&str> {
        self.config.credentials.secret_access_key.as_deref()
    }

    fn session_token(&self) -> Option<&str> {
        self.config.credentials.session_token.as_deref()
    }

    fn is_backup_enabled(&self) -> bool {
        self.config.backup.enabled
    }

    fn backup_bucket(&self) -> &str {
        &self.config.backup.bucket
    }

    fn backup_base_path(&self) -> &str {
        &self.config.backup.base_path
    }

    fn backup_repository_name(&self) -> &str {
        &self.config.backup.repository_name
    }

    fn snapshot_interval(&self) -> Duration {
        Duration::from_secs(self.config.backup.snapshot_interval_secs)
    }

    fn discovery_url(&self) -> Option<&str> {
        self.config.discovery.url.as_deref()
    }

    fn static_peers(&self) -> &[String] {
        &self.config.discovery.static_peers
    }

    fn host_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.config.discovery.refresh_interval_secs)
    }

    fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.config.discovery.timeout_secs)
    }
}
