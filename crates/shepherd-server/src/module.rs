//! Server bindings
//!
//! | Capability | Implementation | Scope |
//! |------------|----------------|-------|
//! | [`PeerCache`] | [`PeerCache`] | singleton |
//! | [`SidecarServer`] | [`SidecarServer`] | singleton |
//! | `dyn ServerHandle` | the same [`SidecarServer`] | singleton |

use std::sync::Arc;

use shepherd_domain::constants::S3_REPOSITORY_QUALIFIER;
use shepherd_domain::ports::{
    BackupRepository, ConfigurationProvider, CredentialProvider, HostSupplier,
    InstanceIdentityFactory, SchedulerFactory, ServerHandle,
};
use shepherd_infrastructure::di::{CapabilityRegistry, Module};

use crate::peers::PeerCache;
use crate::server::{SidecarServer, SidecarServerDeps};

/// Binds the sidecar server as the process's [`ServerHandle`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerModule;

impl Module for ServerModule {
    fn name(&self) -> &'static str {
        "server"
    }

    fn configure(&self, registry: &mut CapabilityRegistry) {
        registry
            .bind::<PeerCache>()
            .to::<PeerCache, _>(|_| Ok(Arc::new(PeerCache::new())));

        registry
            .bind::<SidecarServer>()
            .to::<SidecarServer, _>(|r| {
                Ok(Arc::new(SidecarServer::new(SidecarServerDeps {
                    config: r.get::<dyn ConfigurationProvider>()?,
                    credentials: r.get::<dyn CredentialProvider>()?,
                    hosts: r.get::<dyn HostSupplier>()?,
                    peers: r.get::<PeerCache>()?,
                    identity: r.deferred::<dyn InstanceIdentityFactory>(),
                    repository: r
                        .deferred_named::<dyn BackupRepository>(S3_REPOSITORY_QUALIFIER),
                    scheduler: r.deferred::<dyn SchedulerFactory>(),
                })))
            });

        registry
            .bind::<dyn ServerHandle>()
            .to::<SidecarServer, _>(|r| {
                let server: Arc<dyn ServerHandle> = r.get::<SidecarServer>()?;
                Ok(server)
            });
    }
}
