//! Request dispatch for a REST mount
//!
//! The dispatcher is an eager singleton: it exists before the first request
//! arrives. Resources are resolved through the container on every request,
//! so a transient resource is constructed per request and a singleton is
//! shared.

use std::sync::Arc;

use rocket::http::Status;
use shepherd_infrastructure::di::ContainerRef;
use shepherd_infrastructure::error_chain;
use tracing::{debug, error, warn};

use super::config::DispatcherConfig;
use super::registry::RestResourceEntry;
use super::resource::{RestRequest, RestResource, RestResponse};

#[derive(Debug, Clone)]
struct ResourceRoute {
    name: &'static str,
    base_path: String,
}

impl ResourceRoute {
    /// Remainder of `path` below the base path, if the route serves it
    fn remainder<'p>(&self, path: &'p str) -> Option<&'p str> {
        strip_path_prefix(path, &self.base_path)
    }
}

/// `path` below `prefix`, matching whole segments only
fn strip_path_prefix<'p>(path: &'p str, prefix: &str) -> Option<&'p str> {
    if prefix.is_empty() {
        return Some(path);
    }
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}

/// Routes requests under a mount prefix to scanned resources
pub struct RestDispatcher {
    prefix: String,
    config: DispatcherConfig,
    routes: Vec<ResourceRoute>,
    container: ContainerRef,
}

impl RestDispatcher {
    /// Dispatcher for `prefix` serving `resources`, resolved through `container`
    pub fn new(
        prefix: impl Into<String>,
        config: DispatcherConfig,
        resources: &[&'static RestResourceEntry],
        container: ContainerRef,
    ) -> Self {
        let mut routes: Vec<ResourceRoute> = resources
            .iter()
            .map(|entry| ResourceRoute {
                name: entry.name,
                base_path: entry.base_path.trim_matches('/').to_string(),
            })
            .collect();
        // longest base path wins
        routes.sort_by(|a, b| b.base_path.len().cmp(&a.base_path.len()));
        Self {
            prefix: prefix.into(),
            config,
            routes,
            container,
        }
    }

    /// Mount prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parsed mount parameters
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Names of the resources served, longest base path first
    pub fn resource_names(&self) -> Vec<&'static str> {
        self.routes.iter().map(|route| route.name).collect()
    }

    /// Serve `request`, whose path is relative to the mount prefix
    ///
    /// Without a filter context path, resources match the path below the
    /// prefix. With one, the context path is stripped from the full request
    /// path (prefix included), so a context path equal to the prefix
    /// changes nothing.
    pub async fn dispatch(&self, request: RestRequest) -> RestResponse {
        let routed = request.path.trim_matches('/').to_string();
        let full_path = self.full_path(&routed);
        let Some(path) = self.resource_path(&full_path, &routed) else {
            debug!(prefix = %self.prefix, path = %full_path, "Outside the filter context path");
            return RestResponse::not_found(&full_path);
        };
        let Some((route, remainder)) = self.route(path) else {
            debug!(prefix = %self.prefix, path = %full_path, "No resource matched");
            return RestResponse::not_found(&full_path);
        };

        let resource = match self.container.get_named::<dyn RestResource>(route.name) {
            Ok(resource) => resource,
            Err(err) => {
                error!(
                    resource = route.name,
                    error = %error_chain(&err),
                    "REST resource could not be resolved"
                );
                return RestResponse::error(Status::InternalServerError, error_chain(&err));
            }
        };
        if !resource.methods().contains(&request.method) {
            return RestResponse::method_not_allowed(request.method, &full_path);
        }

        let request = RestRequest {
            path: remainder.to_string(),
            ..request
        };
        Self::invoke(route.name, resource, request).await
    }

    async fn invoke(
        name: &str,
        resource: Arc<dyn RestResource>,
        request: RestRequest,
    ) -> RestResponse {
        match resource.handle(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(resource = name, error = %error_chain(&err), "REST resource failed");
                RestResponse::from_error(&err)
            }
        }
    }

    /// Request path including the prefix, without surrounding slashes
    fn full_path(&self, routed: &str) -> String {
        let prefix = self.prefix.trim_matches('/');
        match (prefix.is_empty(), routed.is_empty()) {
            (true, _) => routed.to_string(),
            (false, true) => prefix.to_string(),
            (false, false) => format!("{prefix}/{routed}"),
        }
    }

    fn resource_path<'p>(&self, full_path: &'p str, routed: &'p str) -> Option<&'p str> {
        match self.config.filter_context_path() {
            None => Some(routed),
            Some(context) => strip_path_prefix(full_path, context),
        }
    }

    fn route<'p>(&self, path: &'p str) -> Option<(&ResourceRoute, &'p str)> {
        self.routes
            .iter()
            .find_map(|route| route.remainder(path).map(|rest| (route, rest)))
    }
}

impl std::fmt::Debug for RestDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestDispatcher")
            .field("prefix", &self.prefix)
            .field("config", &self.config)
            .field("resources", &self.resource_names())
            .finish_non_exhaustive()
    }
}
