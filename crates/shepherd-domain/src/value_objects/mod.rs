//! Value Objects
//!
//! Immutable records exchanged between the sidecar server and its
//! collaborators.

pub mod backup;
pub mod credentials;
pub mod host;
pub mod identity;

pub use backup::RepositoryRegistration;
pub use credentials::CloudCredentials;
pub use host::{HostStatus, PeerHost};
pub use identity::{InstanceIdentity, NodeDescriptor};
