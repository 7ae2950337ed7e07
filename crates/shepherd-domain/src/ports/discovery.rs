//! Host discovery port

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::PeerHost;

/// Supplies the peer hosts of the cluster
#[async_trait]
pub trait HostSupplier: Send + Sync {
    /// Current serving peers
    async fn hosts(&self) -> Result<Vec<PeerHost>>;
}
