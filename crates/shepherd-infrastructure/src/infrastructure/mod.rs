//! Infrastructure Services
//!
//! Default implementations of the collaborator ports, bound by
//! [`SidecarModule`](crate::di::modules::SidecarModule).
//!
//! | Implementation | Port |
//! |----------------|------|
//! | [`InMemoryInstanceFactory`] | `InstanceIdentityFactory` |
//! | [`EnvironmentCredential`] | `CredentialProvider` |
//! | [`S3RepositorySettings`] / [`S3Repository`] | `BackupRepositorySettings` / `BackupRepository` |
//! | [`DiscoveryHostSupplier`] | `HostSupplier` |
//! | [`TokioSchedulerFactory`] / [`TokioJobScheduler`] | `SchedulerFactory` / `JobScheduler` |
//!
//! Code outside the composition root resolves these through the container
//! by port, never by concrete type.

pub mod backup;
pub mod credential;
pub mod discovery;
pub mod identity;
pub mod scheduler;

pub use backup::{S3Repository, S3RepositorySettings};
pub use credential::EnvironmentCredential;
pub use discovery::{DiscoveryHostSupplier, parse_discovery_response};
pub use identity::InMemoryInstanceFactory;
pub use scheduler::{TokioJobScheduler, TokioSchedulerFactory};
