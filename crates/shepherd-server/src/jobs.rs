//! Background jobs run by the sidecar scheduler

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use shepherd_domain::error::Result;
use shepherd_domain::ports::{BackupRepository, HostSupplier, Job};
use tracing::info;

use crate::constants::{HOST_REFRESH_JOB, SNAPSHOT_JOB};
use crate::peers::PeerCache;

/// Refreshes the shared peer listing from the host supplier
pub struct HostRefreshJob {
    supplier: Arc<dyn HostSupplier>,
    peers: Arc<PeerCache>,
}

impl HostRefreshJob {
    /// Job writing the hosts of `supplier` into `peers`
    pub fn new(supplier: Arc<dyn HostSupplier>, peers: Arc<PeerCache>) -> Self {
        Self { supplier, peers }
    }
}

#[async_trait]
impl Job for HostRefreshJob {
    fn name(&self) -> &str {
        HOST_REFRESH_JOB
    }

    async fn execute(&self) -> Result<()> {
        let hosts = self.supplier.hosts().await?;
        info!(peers = hosts.len(), "Peer list refreshed");
        self.peers.replace(hosts);
        Ok(())
    }
}

/// Requests a named snapshot in the backup repository
///
/// Only the snapshot name is produced here; taking the snapshot is the data
/// node's business.
pub struct SnapshotJob {
    repository: Arc<dyn BackupRepository>,
    last_snapshot: Mutex<Option<String>>,
}

impl SnapshotJob {
    /// Job snapshotting into `repository`
    pub fn new(repository: Arc<dyn BackupRepository>) -> Self {
        Self {
            repository,
            last_snapshot: Mutex::new(None),
        }
    }

    /// Name of the most recently requested snapshot
    pub fn last_snapshot(&self) -> Option<String> {
        self.last_snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Job for SnapshotJob {
    fn name(&self) -> &str {
        SNAPSHOT_JOB
    }

    async fn execute(&self) -> Result<()> {
        let registration = self.repository.ensure_registered()?;
        let snapshot = self.repository.snapshot_name(Utc::now());
        info!(
            repository = %registration.name,
            snapshot = %snapshot,
            "Snapshot requested"
        );
        *self
            .last_snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
        Ok(())
    }
}
