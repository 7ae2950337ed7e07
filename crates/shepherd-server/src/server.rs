//! The sidecar server
//!
//! [`SidecarServer`] is the [`ServerHandle`] the startup sequencer
//! initializes. Its collaborators that are only needed while initializing
//! (identity factory, backup repository, scheduler) are looked up late through
//! [`Deferred`] handles, so a missing binding surfaces as an initialization
//! failure naming the capability.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use shepherd_domain::error::{Error, Result};
use shepherd_domain::ports::{
    BackupRepository, ConfigurationProvider, CredentialProvider, HostSupplier,
    InstanceIdentityFactory, JobScheduler, SchedulerFactory, ServerHandle, Trigger,
};
use shepherd_domain::value_objects::{NodeDescriptor, RepositoryRegistration};
use shepherd_infrastructure::di::Deferred;
use tracing::{info, warn};

use crate::jobs::{HostRefreshJob, SnapshotJob};
use crate::peers::PeerCache;

/// What the server did while initializing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerStatus {
    /// Cluster application name
    pub app: String,
    /// Identifier the node registered under
    pub instance_id: String,
    /// When initialization finished
    pub started_at: DateTime<Utc>,
    /// Whether scheduled snapshots are enabled
    pub backup_enabled: bool,
    /// Repository registration, when backup is enabled
    pub repository: Option<RepositoryRegistration>,
    /// Jobs handed to the scheduler
    pub jobs: Vec<String>,
}

/// Collaborators of the [`SidecarServer`]
pub struct SidecarServerDeps {
    /// Sidecar settings
    pub config: Arc<dyn ConfigurationProvider>,
    /// Cloud credentials
    pub credentials: Arc<dyn CredentialProvider>,
    /// Peer source for the refresh job
    pub hosts: Arc<dyn HostSupplier>,
    /// Shared peer listing
    pub peers: Arc<PeerCache>,
    /// Identity registry, looked up while initializing
    pub identity: Deferred<dyn InstanceIdentityFactory>,
    /// The `"s3"` backup repository, looked up while initializing
    pub repository: Deferred<dyn BackupRepository>,
    /// Scheduler source, looked up while initializing
    pub scheduler: Deferred<dyn SchedulerFactory>,
}

/// Top-level sidecar service
pub struct SidecarServer {
    deps: SidecarServerDeps,
    initialized: AtomicBool,
    status: OnceLock<ServerStatus>,
}

impl SidecarServer {
    /// Create an uninitialized server
    pub fn new(deps: SidecarServerDeps) -> Self {
        Self {
            deps,
            initialized: AtomicBool::new(false),
            status: OnceLock::new(),
        }
    }

    /// Status recorded by a successful initialization
    pub fn status(&self) -> Option<&ServerStatus> {
        self.status.get()
    }

    /// Whether initialization completed
    pub fn is_initialized(&self) -> bool {
        self.status.get().is_some()
    }

    /// Shared peer listing
    pub fn peers(&self) -> &Arc<PeerCache> {
        &self.deps.peers
    }

    /// Stop the background jobs, if the scheduler was started
    pub fn shutdown(&self) {
        match self.scheduler() {
            Ok(scheduler) => scheduler.shutdown(),
            Err(err) => warn!(error = %err, "Scheduler unavailable at shutdown"),
        }
    }

    fn scheduler(&self) -> Result<Arc<dyn JobScheduler>> {
        self.deps.scheduler.get()?.scheduler()
    }

    fn register_identity(&self) -> Result<String> {
        let config = &self.deps.config;
        let identity = self.deps.identity.get()?.register(NodeDescriptor {
            app: config.app_name().to_string(),
            instance_id: config.instance_id().to_string(),
            hostname: config.hostname().to_string(),
            host_ip: config.host_ip().to_string(),
            rack: config.rack().to_string(),
        })?;
        Ok(identity.instance_id().to_string())
    }

    fn prepare_repository(
        &self,
    ) -> Result<(Arc<dyn BackupRepository>, Option<RepositoryRegistration>)> {
        let repository = self.deps.repository.get()?;
        if !self.deps.config.is_backup_enabled() {
            if let Err(err) = self.deps.credentials.credentials() {
                warn!(error = %err, "No cloud credentials available; backup is disabled");
            }
            return Ok((repository, None));
        }

        let registration = repository.ensure_registered()?;
        Ok((repository, Some(registration)))
    }

    fn schedule_jobs(
        &self,
        scheduler: &dyn JobScheduler,
        repository: Arc<dyn BackupRepository>,
    ) -> Result<()> {
        let config = &self.deps.config;
        scheduler.schedule(
            Arc::new(HostRefreshJob::new(
                Arc::clone(&self.deps.hosts),
                Arc::clone(&self.deps.peers),
            )),
            Trigger::every(config.host_refresh_interval()),
        )?;

        if config.is_backup_enabled() {
            let every = config.snapshot_interval();
            scheduler.schedule(
                Arc::new(SnapshotJob::new(repository)),
                Trigger::Interval {
                    every,
                    initial_delay: every,
                },
            )?;
        }
        Ok(())
    }
}

impl ServerHandle for SidecarServer {
    fn initialize(&self) -> Result<()> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Err(Error::internal("server is already initialized"));
        }

        let instance_id = self.register_identity()?;
        let (repository, registration) = self.prepare_repository()?;

        let scheduler = self.scheduler()?;
        self.schedule_jobs(scheduler.as_ref(), repository)?;
        scheduler.start()?;

        let status = ServerStatus {
            app: self.deps.config.app_name().to_string(),
            instance_id,
            started_at: Utc::now(),
            backup_enabled: self.deps.config.is_backup_enabled(),
            repository: registration,
            jobs: scheduler.scheduled_jobs(),
        };
        info!(
            app = %status.app,
            instance_id = %status.instance_id,
            backup_enabled = status.backup_enabled,
            jobs = ?status.jobs,
            "Sidecar server initialized"
        );
        self.status.get_or_init(|| status);
        Ok(())
    }
}

impl std::fmt::Debug for SidecarServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SidecarServer")
            .field("app", &self.deps.config.app_name())
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}
