//! Cluster configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Identity of the local node and the cluster it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Cluster application name
    pub app_name: String,
    /// Cloud region
    pub region: String,
    /// Rack or availability zone
    pub rack: String,
    /// Unique node identifier
    pub instance_id: String,
    /// Host name of the node
    pub hostname: String,
    /// IP address of the node
    pub host_ip: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        let hostname = local_hostname();
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            rack: DEFAULT_RACK.to_string(),
            instance_id: hostname.clone(),
            hostname,
            host_ip: DEFAULT_SERVER_HOST.to_string(),
        }
    }
}

/// Host name of the machine, `localhost` when it cannot be read
pub fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}
