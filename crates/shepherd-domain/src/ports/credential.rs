//! Credential provider port

use crate::error::Result;
use crate::value_objects::CloudCredentials;

/// Produces credentials for the cloud object store
pub trait CredentialProvider: Send + Sync {
    /// Current credentials
    fn credentials(&self) -> Result<CloudCredentials>;
}
