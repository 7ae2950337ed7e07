//! Server-specific constants
//!
//! Parameter keys understood by the REST dispatcher, job names and the
//! paths of the built-in resources.

// ============================================================================
// REST MOUNT PARAMETERS
// ============================================================================

/// Packages scanned for REST resources, separated by `,` or `;`
pub const REST_RESOURCE_PACKAGES_PARAM: &str = "shepherd.rest.resource-packages";

/// Path prefix stripped from request paths before resource matching
pub const REST_FILTER_CONTEXT_PATH_PARAM: &str = "shepherd.rest.filter-context-path";

/// Separators accepted between scanned packages
pub const REST_PACKAGE_SEPARATORS: &[char] = &[',', ';'];

/// Separator between a package and its sub-packages
pub const PACKAGE_SEPARATOR: char = '.';

/// Request body limit applied when the Rocket `json` limit is unset
pub const REST_BODY_LIMIT_MIB: u64 = 1;

// ============================================================================
// JOBS
// ============================================================================

/// Name of the peer refresh job
pub const HOST_REFRESH_JOB: &str = "host-refresh";

/// Name of the scheduled snapshot job
pub const SNAPSHOT_JOB: &str = "snapshot";

// ============================================================================
// BUILT-IN RESOURCES
// ============================================================================

/// Package holding the built-in resources
pub const BUILTIN_RESOURCE_PACKAGE: &str = "shepherd.resources";

/// Base path of the status resource
pub const STATUS_RESOURCE_PATH: &str = "v1/status";

/// Base path of the cluster resource
pub const CLUSTER_RESOURCE_PATH: &str = "v1/cluster";
