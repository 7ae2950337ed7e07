//! Cluster view resource

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shepherd_domain::error::{Error, Result};
use shepherd_domain::ports::{ConfigurationProvider, InstanceIdentityFactory};
use shepherd_infrastructure::di::{ResolveError, Resolver, Scope};

use crate::constants::{BUILTIN_RESOURCE_PACKAGE, CLUSTER_RESOURCE_PATH};
use crate::peers::PeerCache;
use crate::rest::registry::{REST_RESOURCES, RestResourceEntry};
use crate::rest::resource::{RestRequest, RestResource, RestResponse};

/// Body of `GET v1/cluster`
#[derive(Debug, Clone, Serialize)]
pub struct ClusterSummary {
    /// Cluster application name
    pub app: String,
    /// Region of the local node
    pub region: String,
    /// Rack of the local node
    pub rack: String,
    /// Number of known peers
    pub peers: usize,
    /// Number of registered instances
    pub instances: usize,
    /// Last peer refresh
    pub peers_refreshed_at: Option<DateTime<Utc>>,
}

/// Cluster membership as seen by this node
///
/// | Path | Body |
/// |------|------|
/// | `v1/cluster` | [`ClusterSummary`] |
/// | `v1/cluster/peers` | peer listing |
/// | `v1/cluster/instances` | registered identities |
pub struct ClusterResource {
    config: Arc<dyn ConfigurationProvider>,
    peers: Arc<PeerCache>,
    identity: Arc<dyn InstanceIdentityFactory>,
}

impl ClusterResource {
    /// Resource over the given collaborators
    pub fn new(
        config: Arc<dyn ConfigurationProvider>,
        peers: Arc<PeerCache>,
        identity: Arc<dyn InstanceIdentityFactory>,
    ) -> Self {
        Self {
            config,
            peers,
            identity,
        }
    }

    fn summary(&self) -> Result<ClusterSummary> {
        let snapshot = self.peers.snapshot();
        Ok(ClusterSummary {
            app: self.config.app_name().to_string(),
            region: self.config.region().to_string(),
            rack: self.config.rack().to_string(),
            peers: snapshot.hosts.len(),
            instances: self.identity.instances(self.config.app_name())?.len(),
            peers_refreshed_at: snapshot.refreshed_at,
        })
    }
}

#[async_trait]
impl RestResource for ClusterResource {
    async fn handle(&self, request: RestRequest) -> Result<RestResponse> {
        match request.path.as_str() {
            "" => RestResponse::ok(&self.summary()?),
            "peers" => RestResponse::ok(&self.peers.snapshot()),
            "instances" => {
                RestResponse::ok(&self.identity.instances(self.config.app_name())?)
            }
            other => Err(Error::not_found(format!("{CLUSTER_RESOURCE_PATH}/{other}"))),
        }
    }
}

fn cluster_resource_factory(
    r: &Resolver<'_>,
) -> std::result::Result<Arc<dyn RestResource>, ResolveError> {
    Ok(Arc::new(ClusterResource::new(
        r.get::<dyn ConfigurationProvider>()?,
        r.get::<PeerCache>()?,
        r.get::<dyn InstanceIdentityFactory>()?,
    )))
}

#[linkme::distributed_slice(REST_RESOURCES)]
static CLUSTER_RESOURCE: RestResourceEntry = RestResourceEntry {
    package: BUILTIN_RESOURCE_PACKAGE,
    name: "cluster",
    description: "Peers and registered instances of the cluster",
    base_path: CLUSTER_RESOURCE_PATH,
    scope: Scope::Singleton,
    factory: cluster_resource_factory,
};
