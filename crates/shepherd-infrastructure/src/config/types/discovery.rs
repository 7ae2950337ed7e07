//! Discovery configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Peer discovery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Base URL of the discovery service; static peers are used when unset
    pub url: Option<String>,
    /// Peers used without a discovery service
    pub static_peers: Vec<String>,
    /// Peer refresh interval in seconds
    pub refresh_interval_secs: u64,
    /// Discovery request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            url: None,
            static_peers: Vec::new(),
            refresh_interval_secs: DEFAULT_HOST_REFRESH_INTERVAL_SECS,
            timeout_secs: DEFAULT_DISCOVERY_TIMEOUT_SECS,
        }
    }
}
