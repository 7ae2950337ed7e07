//! Server handle port

use crate::error::Result;

/// The top-level service started by the composition root
pub trait ServerHandle: Send + Sync {
    /// One-time initialization, run synchronously at process start
    fn initialize(&self) -> Result<()>;
}
