//! Domain Port Interfaces
//!
//! Contracts the composition root binds to concrete implementations.
//! Every port is object-safe and `Send + Sync` so it can be shared as
//! `Arc<dyn Port>` by request and scheduler tasks.
//!
//! ## Organization
//!
//! | Port | Purpose |
//! |------|---------|
//! | [`ConfigurationProvider`] | Read-only settings access |
//! | [`InstanceIdentityFactory`] | Identity records for cluster nodes |
//! | [`CredentialProvider`] | Cloud-access credentials |
//! | [`BackupRepository`] / [`BackupRepositorySettings`] | Object-storage backup repository |
//! | [`SchedulerFactory`] / [`JobScheduler`] / [`Job`] | Background job scheduling |
//! | [`HostSupplier`] | Peer hosts from a discovery service |
//! | [`ServerHandle`] | Top-level service initialized at startup |

pub mod backup;
pub mod configuration;
pub mod credential;
pub mod discovery;
pub mod identity;
pub mod scheduler;
pub mod server;

pub use backup::{BackupRepository, BackupRepositorySettings};
pub use configuration::ConfigurationProvider;
pub use credential::CredentialProvider;
pub use discovery::HostSupplier;
pub use identity::InstanceIdentityFactory;
pub use scheduler::{Job, JobScheduler, SchedulerFactory, Trigger};
pub use server::ServerHandle;
