//! Configuration
//!
//! Layered settings loaded with figment (defaults, TOML file, `SHEPHERD__`
//! environment variables) and exposed to collaborators through the
//! read-only [`ConfigurationProvider`](shepherd_domain::ports::ConfigurationProvider)
//! port.

pub mod loader;
pub mod provider;
pub mod types;

pub use loader::ConfigLoader;
pub use provider::SidecarConfiguration;
pub use types::*;
