//! Server configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// REST front-end mount
    pub rest: RestConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
            rest: RestConfig::default(),
        }
    }
}

/// REST front-end mount configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestConfig {
    /// URL prefix the dispatcher is mounted under
    pub prefix: String,
    /// Prefix of the full request path stripped before matching resources;
    /// usually equal to `prefix`
    pub filter_context_path: Option<String>,
    /// Packages scanned for resources
    pub resource_packages: Vec<String>,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_REST_PREFIX.to_string(),
            filter_context_path: None,
            resource_packages: vec![DEFAULT_REST_RESOURCE_PACKAGE.to_string()],
        }
    }
}
