//! Peer host value objects

use serde::{Deserialize, Serialize};

use crate::constants::DISCOVERY_STATUS_UP;

/// Serving status of a peer as reported by discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostStatus {
    /// Serving traffic
    Up,
    /// Known but not serving
    Down,
    /// Status could not be determined
    Unknown,
}

impl HostStatus {
    /// Parse a discovery status string, case-insensitively
    pub fn from_discovery(status: &str) -> Self {
        if status.eq_ignore_ascii_case(DISCOVERY_STATUS_UP) {
            Self::Up
        } else if status.eq_ignore_ascii_case("DOWN") || status.eq_ignore_ascii_case("OUT_OF_SERVICE")
        {
            Self::Down
        } else {
            Self::Unknown
        }
    }
}

/// A peer node of the cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerHost {
    /// Host name of the peer
    pub hostname: String,
    /// IP address, when discovery reports one
    pub host_ip: Option<String>,
    /// Rack or availability zone, when known
    pub rack: Option<String>,
    /// Serving status
    pub status: HostStatus,
}

impl PeerHost {
    /// A serving peer known only by host name
    pub fn up(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            host_ip: None,
            rack: None,
            status: HostStatus::Up,
        }
    }

    /// Whether the peer is serving
    pub fn is_up(&self) -> bool {
        self.status == HostStatus::Up
    }
}
