//! REST Resource Registry
//!
//! Resources register themselves at link time via
//! `#[linkme::distributed_slice(REST_RESOURCES)]`, tagged with the package
//! they belong to. A mount scans one or more packages: an entry is selected
//! when its package equals a scanned package or lies beneath it.

use std::sync::Arc;

use shepherd_infrastructure::di::{ResolveError, Resolver, Scope};

use super::resource::RestResource;
use crate::constants::PACKAGE_SEPARATOR;

/// Factory building a resource from its collaborators
pub type RestResourceFactory = fn(&Resolver<'_>) -> Result<Arc<dyn RestResource>, ResolveError>;

/// Registry entry for a REST resource
pub struct RestResourceEntry {
    /// Package the resource belongs to (e.g. `shepherd.resources`)
    pub package: &'static str,
    /// Unique resource name; also the qualifier of its binding
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Path under the mount prefix the resource serves
    pub base_path: &'static str,
    /// Lifetime of resource instances
    pub scope: Scope,
    /// Factory function to create the resource
    pub factory: RestResourceFactory,
}

impl std::fmt::Debug for RestResourceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestResourceEntry")
            .field("package", &self.package)
            .field("name", &self.name)
            .field("base_path", &self.base_path)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

// Auto-collection via linkme distributed slices - resources submit entries at compile time
#[linkme::distributed_slice]
pub static REST_RESOURCES: [RestResourceEntry] = [..];

/// Whether `package` is `root` or one of its sub-packages
pub fn package_matches(package: &str, root: &str) -> bool {
    package == root
        || package
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with(PACKAGE_SEPARATOR))
}

/// Entries found under any of `roots`, in registration order
pub fn scan_rest_resources(roots: &[String]) -> Vec<&'static RestResourceEntry> {
    REST_RESOURCES
        .iter()
        .filter(|entry| roots.iter().any(|root| package_matches(entry.package, root)))
        .collect()
}

/// List all registered resources
///
/// Returns (package, name, description) tuples.
pub fn list_rest_resources() -> Vec<(&'static str, &'static str, &'static str)> {
    REST_RESOURCES
        .iter()
        .map(|e| (e.package, e.name, e.description))
        .collect()
}
