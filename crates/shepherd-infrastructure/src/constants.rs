//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `shepherd_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "shepherd.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "shepherd";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "SHEPHERD";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// CLUSTER CONSTANTS
// ============================================================================

/// Default cluster application name
pub const DEFAULT_APP_NAME: &str = "shepherd";

/// Default cloud region
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default rack
pub const DEFAULT_RACK: &str = "rack-1";

// ============================================================================
// CREDENTIAL CONSTANTS
// ============================================================================

/// Environment variable holding the access key id
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";

/// Environment variable holding the secret access key
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// Environment variable holding the session token
pub const ENV_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

// ============================================================================
// BACKUP CONSTANTS
// ============================================================================

/// Default backup repository name
pub const DEFAULT_BACKUP_REPOSITORY_NAME: &str = "shepherd-backups";

/// Default key prefix inside the backup bucket
pub const DEFAULT_BACKUP_BASE_PATH: &str = "snapshots";

/// Default snapshot interval in seconds (1 hour)
pub const DEFAULT_SNAPSHOT_INTERVAL_SECS: u64 = 3600;

// ============================================================================
// DISCOVERY CONSTANTS
// ============================================================================

/// Default peer refresh interval in seconds
pub const DEFAULT_HOST_REFRESH_INTERVAL_SECS: u64 = 60;

/// Default discovery request timeout in seconds
pub const DEFAULT_DISCOVERY_TIMEOUT_SECS: u64 = 10;

/// Discovery endpoint listing the instances of an application
pub const DISCOVERY_APPS_PATH: &str = "v2/apps";

// ============================================================================
// HTTP SERVER CONSTANTS
// ============================================================================

/// Default HTTP server port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default server host
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default prefix the REST dispatcher is mounted under
pub const DEFAULT_REST_PREFIX: &str = "/REST";

/// Default package scanned for REST resources
pub const DEFAULT_REST_RESOURCE_PACKAGE: &str = "shepherd.resources";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "SHEPHERD_LOG";

/// Log file rotation prefix
pub const LOG_FILE_PREFIX: &str = "shepherd";
