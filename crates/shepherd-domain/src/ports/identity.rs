//! Instance identity port

use crate::error::Result;
use crate::value_objects::{InstanceIdentity, NodeDescriptor};

/// Produces and tracks identity records for cluster nodes
pub trait InstanceIdentityFactory: Send + Sync {
    /// Register `node`, replacing any earlier record of the same instance
    fn register(&self, node: NodeDescriptor) -> Result<InstanceIdentity>;

    /// All identities registered for `app`, ordered by instance id
    fn instances(&self, app: &str) -> Result<Vec<InstanceIdentity>>;

    /// Look up a single identity
    fn find(&self, app: &str, instance_id: &str) -> Result<Option<InstanceIdentity>>;

    /// Remove an identity, returning whether it existed
    fn deregister(&self, app: &str, instance_id: &str) -> Result<bool>;
}
