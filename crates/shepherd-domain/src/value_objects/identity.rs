//! Instance identity value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Description of the local node as known before registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Cluster application name the node belongs to
    pub app: String,
    /// Unique identifier of the node
    pub instance_id: String,
    /// Resolvable host name
    pub hostname: String,
    /// Reachable IP address
    pub host_ip: String,
    /// Rack or availability zone
    pub rack: String,
}

/// A registered node identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceIdentity {
    /// The node this identity describes
    #[serde(flatten)]
    pub node: NodeDescriptor,
    /// When the identity was (re-)registered
    pub registered_at: DateTime<Utc>,
}

impl InstanceIdentity {
    /// Create an identity for `node` registered at `registered_at`
    pub fn new(node: NodeDescriptor, registered_at: DateTime<Utc>) -> Self {
        Self {
            node,
            registered_at,
        }
    }

    /// Application the identity belongs to
    pub fn app(&self) -> &str {
        &self.node.app
    }

    /// Instance identifier
    pub fn instance_id(&self) -> &str {
        &self.node.instance_id
    }
}
