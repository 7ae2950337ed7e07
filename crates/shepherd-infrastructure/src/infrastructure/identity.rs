//! In-memory instance identity registry

use chrono::Utc;
use dashmap::DashMap;
use shepherd_domain::error::{Error, Result};
use shepherd_domain::ports::InstanceIdentityFactory;
use shepherd_domain::value_objects::{InstanceIdentity, NodeDescriptor};
use tracing::{debug, info};

/// Identity records kept in process memory, keyed by (app, instance id)
#[derive(Debug, Default)]
pub struct InMemoryInstanceFactory {
    identities: DashMap<(String, String), InstanceIdentity>,
}

impl InMemoryInstanceFactory {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered identities across all apps
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Whether no identity is registered
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl InstanceIdentityFactory for InMemoryInstanceFactory {
    fn register(&self, node: NodeDescriptor) -> Result<InstanceIdentity> {
        if node.app.trim().is_empty() {
            return Err(Error::identity("app name cannot be empty"));
        }
        if node.instance_id.trim().is_empty() {
            return Err(Error::identity("instance id cannot be empty"));
        }

        let identity = InstanceIdentity::new(node, Utc::now());
        let key = (identity.app().to_string(), identity.instance_id().to_string());
        let replaced = self.identities.insert(key, identity.clone()).is_some();
        info!(
            app = identity.app(),
            instance_id = identity.instance_id(),
            replaced,
            "Instance identity registered"
        );
        Ok(identity)
    }

    fn instances(&self, app: &str) -> Result<Vec<InstanceIdentity>> {
        let mut instances: Vec<InstanceIdentity> = self
            .identities
            .iter()
            .filter(|entry| entry.key().0 == app)
            .map(|entry| entry.value().clone())
            .collect();
        instances.sort_by(|a, b| a.instance_id().cmp(b.instance_id()));
        Ok(instances)
    }

    fn find(&self, app: &str, instance_id: &str) -> Result<Option<InstanceIdentity>> {
        Ok(self
            .identities
            .get(&(app.to_string(), instance_id.to_string()))
            .map(|entry| entry.value().clone()))
    }

    fn deregister(&self, app: &str, instance_id: &str) -> Result<bool> {
        let removed = self
            .identities
            .remove(&(app.to_string(), instance_id.to_string()))
            .is_some();
        debug!(app, instance_id, removed, "Instance identity deregistered");
        Ok(removed)
    }
}
