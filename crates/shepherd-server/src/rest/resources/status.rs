//! Sidecar status resource

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shepherd_domain::error::{Error, Result};
use shepherd_domain::ports::ConfigurationProvider;
use shepherd_infrastructure::di::{ResolveError, Resolver, Scope};

use crate::constants::{BUILTIN_RESOURCE_PACKAGE, STATUS_RESOURCE_PATH};
use crate::rest::registry::{REST_RESOURCES, RestResourceEntry};
use crate::rest::resource::{RestRequest, RestResource, RestResponse};
use crate::server::{ServerStatus, SidecarServer};

/// Body of `GET v1/status`
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Cluster application name
    pub app: String,
    /// Local instance identifier
    pub instance_id: String,
    /// Whether the server finished initializing
    pub initialized: bool,
    /// Initialization details
    pub server: Option<ServerStatus>,
    /// Number of known peers
    pub peers: usize,
    /// When this report was produced
    pub generated_at: DateTime<Utc>,
}

/// Reports what the sidecar did at startup
///
/// Transient: a fresh instance serves every request.
pub struct StatusResource {
    config: Arc<dyn ConfigurationProvider>,
    server: Arc<SidecarServer>,
    created_at: DateTime<Utc>,
}

impl StatusResource {
    /// Resource reporting on `server`
    pub fn new(config: Arc<dyn ConfigurationProvider>, server: Arc<SidecarServer>) -> Self {
        Self {
            config,
            server,
            created_at: Utc::now(),
        }
    }

    /// Current report
    pub fn report(&self) -> StatusReport {
        StatusReport {
            app: self.config.app_name().to_string(),
            instance_id: self.config.instance_id().to_string(),
            initialized: self.server.is_initialized(),
            server: self.server.status().cloned(),
            peers: self.server.peers().len(),
            generated_at: self.created_at,
        }
    }
}

#[async_trait]
impl RestResource for StatusResource {
    async fn handle(&self, request: RestRequest) -> Result<RestResponse> {
        if !request.path.is_empty() {
            return Err(Error::not_found(format!(
                "{STATUS_RESOURCE_PATH}/{}",
                request.path
            )));
        }
        RestResponse::ok(&self.report())
    }
}

fn status_resource_factory(
    r: &Resolver<'_>,
) -> std::result::Result<Arc<dyn RestResource>, ResolveError> {
    Ok(Arc::new(StatusResource::new(
        r.get::<dyn ConfigurationProvider>()?,
        r.get::<SidecarServer>()?,
    )))
}

#[linkme::distributed_slice(REST_RESOURCES)]
static STATUS_RESOURCE: RestResourceEntry = RestResourceEntry {
    package: BUILTIN_RESOURCE_PACKAGE,
    name: "status",
    description: "Initialization status of the sidecar",
    base_path: STATUS_RESOURCE_PATH,
    scope: Scope::Transient,
    factory: status_resource_factory,
};
