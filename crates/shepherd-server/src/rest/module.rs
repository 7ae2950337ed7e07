//! REST front-end bindings
//!
//! [`RestModule::mount`] declares a URL prefix served by a [`RestDispatcher`].
//! For each mount the module binds:
//!
//! | Capability | Qualifier | Scope |
//! |------------|-----------|-------|
//! | [`RestDispatcher`] | mount prefix | singleton (constructed at build) |
//! | `dyn RestResource` | resource name | as registered |
//!
//! and adds the [`MountPoint`] the server turns into a wildcard route.

use std::collections::HashSet;
use std::sync::Arc;

use shepherd_infrastructure::config::RestConfig;
use shepherd_infrastructure::di::{CapabilityKey, CapabilityRegistry, Module, MountPoint};
use tracing::warn;

use super::config::DispatcherConfig;
use super::dispatcher::RestDispatcher;
use super::registry::scan_rest_resources;
use super::resource::RestResource;

#[derive(Debug, Clone)]
struct RestMount {
    prefix: String,
    config: DispatcherConfig,
}

/// Declares REST mounts and the resources they serve
#[derive(Debug, Clone, Default)]
pub struct RestModule {
    mounts: Vec<RestMount>,
}

impl RestModule {
    /// Module without mounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Module mounting the configured REST prefix
    pub fn from_config(rest: &RestConfig) -> Self {
        Self::new().mount(&rest.prefix, DispatcherConfig::from_rest_config(rest))
    }

    /// Serve `prefix` with a dispatcher configured by `config`
    #[must_use]
    pub fn mount(mut self, prefix: impl AsRef<str>, config: DispatcherConfig) -> Self {
        self.mounts.push(RestMount {
            prefix: normalize_prefix(prefix.as_ref()),
            config,
        });
        self
    }

    /// Declared prefixes
    pub fn prefixes(&self) -> Vec<&str> {
        self.mounts.iter().map(|m| m.prefix.as_str()).collect()
    }
}

impl Module for RestModule {
    fn name(&self) -> &'static str {
        "rest"
    }

    fn configure(&self, registry: &mut CapabilityRegistry) {
        let mut bound = HashSet::new();
        for mount in &self.mounts {
            let resources = scan_rest_resources(mount.config.resource_packages());
            if resources.is_empty() {
                warn!(
                    prefix = %mount.prefix,
                    packages = ?mount.config.resource_packages(),
                    "No REST resources found for mount"
                );
            }

            // a resource scanned by several mounts is bound once and shared
            for entry in &resources {
                if bound.insert(entry.name) {
                    registry
                        .bind::<dyn RestResource>()
                        .named(entry.name)
                        .in_scope(entry.scope)
                        .to_factory(entry.name, entry.factory);
                }
            }

            let prefix = mount.prefix.clone();
            let config = mount.config.clone();
            registry
                .bind::<RestDispatcher>()
                .named(mount.prefix.as_str())
                .to::<RestDispatcher, _>(move |r| {
                    Ok(Arc::new(RestDispatcher::new(
                        prefix.clone(),
                        config.clone(),
                        &resources,
                        r.container(),
                    )))
                });
            registry.mount(MountPoint::new(
                mount.prefix.clone(),
                CapabilityKey::named::<RestDispatcher>(mount.prefix.as_str()),
                mount.config.to_params(),
            ));
        }
    }
}

/// Leading slash, no trailing slash; the root prefix stays `/`
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    format!("/{trimmed}")
}
