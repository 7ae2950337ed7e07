//! Shared view of the cluster peers
//!
//! Written by the host refresh job, read by REST resources.

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use shepherd_domain::value_objects::PeerHost;

/// The most recent peer listing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeerSnapshot {
    /// Serving peers
    pub hosts: Vec<PeerHost>,
    /// When the listing was taken; `None` before the first refresh
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Peer listing shared between the refresh job and request handlers
#[derive(Debug, Default)]
pub struct PeerCache {
    snapshot: RwLock<PeerSnapshot>,
}

impl PeerCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listing, stamping the refresh time
    pub fn replace(&self, hosts: Vec<PeerHost>) {
        let mut snapshot = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        snapshot.hosts = hosts;
        snapshot.refreshed_at = Some(Utc::now());
    }

    /// Copy of the current listing
    pub fn snapshot(&self) -> PeerSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of known peers
    pub fn len(&self) -> usize {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .hosts
            .len()
    }

    /// Whether no peer is known
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
