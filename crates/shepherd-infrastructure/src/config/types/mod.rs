//! Configuration types module

pub mod app;
pub mod backup;
pub mod cluster;
pub mod credentials;
pub mod discovery;
pub mod logging;
pub mod server;

// Re-export main types
pub use app::AppConfig;
pub use backup::BackupConfig;
pub use cluster::ClusterConfig;
pub use credentials::CredentialsConfig;
pub use discovery::DiscoveryConfig;
pub use logging::LoggingConfig;
pub use server::{RestConfig, ServerConfig};
