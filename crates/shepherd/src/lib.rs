//! # Shepherd
//!
//! Sidecar that runs next to a clustered data node. It assembles its
//! collaborators (configuration, identity, credentials, backup repository,
//! scheduler, peer discovery) in a capability registry, starts the sidecar
//! server and serves the REST mounts.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use shepherd::infrastructure::config::AppConfig;
//! use shepherd::infrastructure::di::bootstrap;
//! use shepherd::server::sidecar_modules;
//!
//! let config = Arc::new(AppConfig::default());
//! let container = bootstrap(&sidecar_modules(&config))?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - collaborator ports, value objects and domain errors
//! - `infrastructure` - capability registry, assembler, startup, config, logging
//! - `server` - sidecar server, background jobs and the REST front end

/// Domain layer - ports and value objects
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use shepherd_domain::*;
}

/// Infrastructure layer - DI, config and default collaborators
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use shepherd_infrastructure::*;
}

/// Server layer - sidecar server and REST mounts
///
/// Re-exports from the server crate for convenience
pub mod server {
    pub use shepherd_server::*;
}

// Re-export main entry point at the crate root
pub use server::run_server;

pub use server::{SidecarServer, sidecar_modules};
