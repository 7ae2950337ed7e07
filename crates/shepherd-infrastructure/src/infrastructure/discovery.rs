//! Peer discovery over HTTP

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use shepherd_domain::error::Result;
use shepherd_domain::ports::{ConfigurationProvider, HostSupplier};
use shepherd_domain::value_objects::{HostStatus, PeerHost};
use tracing::debug;

use crate::constants::DISCOVERY_APPS_PATH;
use crate::error_ext::ErrorContext;

/// Metadata key holding the rack of a discovered instance
const RACK_METADATA_KEY: &str = "availability-zone";

#[derive(Debug, Deserialize)]
struct ApplicationEnvelope {
    application: Application,
}

#[derive(Debug, Deserialize)]
struct Application {
    #[serde(default)]
    instance: Vec<DiscoveredInstance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscoveredInstance {
    host_name: String,
    #[serde(default)]
    ip_addr: Option<String>,
    status: String,
    #[serde(default)]
    data_center_info: Option<DataCenterInfo>,
}

#[derive(Debug, Deserialize)]
struct DataCenterInfo {
    #[serde(default)]
    metadata: HashMap<String, String>,
}

impl From<DiscoveredInstance> for PeerHost {
    fn from(instance: DiscoveredInstance) -> Self {
        let rack = instance
            .data_center_info
            .and_then(|info| info.metadata.get(RACK_METADATA_KEY).cloned());
        Self {
            hostname: instance.host_name,
            host_ip: instance.ip_addr,
            rack,
            status: HostStatus::from_discovery(&instance.status),
        }
    }
}

/// Parse a discovery application listing, keeping serving instances only
pub fn parse_discovery_response(body: &str) -> Result<Vec<PeerHost>> {
    let envelope: ApplicationEnvelope =
        serde_json::from_str(body).discovery_context("Malformed discovery response")?;
    Ok(envelope
        .application
        .instance
        .into_iter()
        .map(PeerHost::from)
        .filter(PeerHost::is_up)
        .collect())
}

/// Supplies peers from a discovery service, or from static configuration
/// when no discovery URL is set
pub struct DiscoveryHostSupplier {
    config: Arc<dyn ConfigurationProvider>,
    client: reqwest::Client,
}

impl DiscoveryHostSupplier {
    /// Create a supplier using the configured discovery timeout
    pub fn new(config: Arc<dyn ConfigurationProvider>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.discovery_timeout())
            .build()
            .network_context("Failed to build discovery HTTP client")?;
        Ok(Self { config, client })
    }

    /// URL listing the instances of the configured application
    pub fn applications_url(&self) -> Option<String> {
        self.config.discovery_url().map(|base| {
            format!(
                "{}/{DISCOVERY_APPS_PATH}/{}",
                base.trim_end_matches('/'),
                self.config.app_name()
            )
        })
    }

    fn static_hosts(&self) -> Vec<PeerHost> {
        self.config
            .static_peers()
            .iter()
            .map(|peer| peer.trim())
            .filter(|peer| !peer.is_empty())
            .map(PeerHost::up)
            .collect()
    }
}

#[async_trait]
impl HostSupplier for DiscoveryHostSupplier {
    async fn hosts(&self) -> Result<Vec<PeerHost>> {
        let Some(url) = self.applications_url() else {
            return Ok(self.static_hosts());
        };

        let body = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .network_context(format!("Discovery request to {url} failed"))?
            .error_for_status()
            .discovery_context(format!("Discovery service rejected {url}"))?
            .text()
            .await
            .network_context("Failed to read discovery response")?;

        let hosts = parse_discovery_response(&body)?;
        debug!(url = %url, hosts = hosts.len(), "Discovered peer hosts");
        Ok(hosts)
    }
}

impl std::fmt::Debug for DiscoveryHostSupplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryHostSupplier")
            .field("url", &self.applications_url())
            .finish_non_exhaustive()
    }
}
