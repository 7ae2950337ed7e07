//! Core collaborator bindings of the sidecar
//!
//! | Capability | Implementation | Qualifier |
//! |------------|----------------|-----------|
//! | `dyn ConfigurationProvider` | [`SidecarConfiguration`] | |
//! | `dyn InstanceIdentityFactory` | [`InMemoryInstanceFactory`] | |
//! | `dyn CredentialProvider` | [`EnvironmentCredential`] | |
//! | `dyn BackupRepositorySettings` | [`S3RepositorySettings`] | `s3` |
//! | `dyn BackupRepository` | [`S3Repository`] | `s3` |
//! | `dyn SchedulerFactory` | [`TokioSchedulerFactory`] | |
//! | `dyn HostSupplier` | [`DiscoveryHostSupplier`] | |
//!
//! Every binding is a singleton.

use std::sync::Arc;

use shepherd_domain::constants::S3_REPOSITORY_QUALIFIER;
use shepherd_domain::ports::{
    BackupRepository, BackupRepositorySettings, ConfigurationProvider, CredentialProvider,
    HostSupplier, InstanceIdentityFactory, SchedulerFactory,
};

use crate::config::{AppConfig, SidecarConfiguration};
use crate::di::{CapabilityRegistry, Module};
use crate::infrastructure::{
    DiscoveryHostSupplier, EnvironmentCredential, InMemoryInstanceFactory, S3Repository,
    S3RepositorySettings, TokioSchedulerFactory,
};

/// Binds the default implementation of every collaborator port
#[derive(Debug, Clone)]
pub struct SidecarModule {
    config: Arc<AppConfig>,
}

impl SidecarModule {
    /// Module serving `config` through the configuration provider
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}

impl Module for SidecarModule {
    fn name(&self) -> &'static str {
        "sidecar"
    }

    fn configure(&self, registry: &mut CapabilityRegistry) {
        let config = Arc::clone(&self.config);
        registry
            .bind::<dyn ConfigurationProvider>()
            .to::<SidecarConfiguration, _>(move |_| {
                let provider: Arc<dyn ConfigurationProvider> =
                    Arc::new(SidecarConfiguration::new(Arc::clone(&config)));
                Ok(provider)
            });

        registry
            .bind::<dyn InstanceIdentityFactory>()
            .to::<InMemoryInstanceFactory, _>(|_| {
                let factory: Arc<dyn InstanceIdentityFactory> =
                    Arc::new(InMemoryInstanceFactory::new());
                Ok(factory)
            });

        registry
            .bind::<dyn CredentialProvider>()
            .to::<EnvironmentCredential, _>(|r| {
                let provider: Arc<dyn CredentialProvider> = Arc::new(EnvironmentCredential::new(
                    r.get::<dyn ConfigurationProvider>()?,
                ));
                Ok(provider)
            });

        registry
            .bind::<dyn BackupRepositorySettings>()
            .named(S3_REPOSITORY_QUALIFIER)
            .to::<S3RepositorySettings, _>(|r| {
                let config = r.get::<dyn ConfigurationProvider>()?;
                let settings: Arc<dyn BackupRepositorySettings> =
                    Arc::new(S3RepositorySettings::from_config(config.as_ref()));
                Ok(settings)
            });

        registry
            .bind::<dyn BackupRepository>()
            .named(S3_REPOSITORY_QUALIFIER)
            .to::<S3Repository, _>(|r| {
                let repository: Arc<dyn BackupRepository> = Arc::new(S3Repository::new(
                    r.get_named::<dyn BackupRepositorySettings>(S3_REPOSITORY_QUALIFIER)?,
                    r.get::<dyn CredentialProvider>()?,
                ));
                Ok(repository)
            });

        registry
            .bind::<dyn SchedulerFactory>()
            .to::<TokioSchedulerFactory, _>(|_| {
                let factory: Arc<dyn SchedulerFactory> = Arc::new(TokioSchedulerFactory::new());
                Ok(factory)
            });

        registry
            .bind::<dyn HostSupplier>()
            .to::<DiscoveryHostSupplier, _>(|r| {
                let supplier: Arc<dyn HostSupplier> = Arc::new(DiscoveryHostSupplier::new(
                    r.get::<dyn ConfigurationProvider>()?,
                )?);
                Ok(supplier)
            });
    }
}
