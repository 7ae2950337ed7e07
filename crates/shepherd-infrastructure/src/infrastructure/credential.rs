//! Credentials from the process environment

use std::fmt;
use std::sync::Arc;

use shepherd_domain::error::{Error, Result};
use shepherd_domain::ports::{ConfigurationProvider, CredentialProvider};
use shepherd_domain::value_objects::CloudCredentials;
use tracing::debug;

use crate::constants::{ENV_ACCESS_KEY_ID, ENV_SECRET_ACCESS_KEY, ENV_SESSION_TOKEN};

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads credentials from `AWS_*` environment variables, falling back to
/// statically configured values
pub struct EnvironmentCredential {
    config: Arc<dyn ConfigurationProvider>,
    lookup: Lookup,
}

impl EnvironmentCredential {
    /// Credentials from the process environment
    pub fn new(config: Arc<dyn ConfigurationProvider>) -> Self {
        Self::with_lookup(config, |name| std::env::var(name).ok())
    }

    /// Credentials from a custom variable lookup
    pub fn with_lookup<F>(config: Arc<dyn ConfigurationProvider>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            config,
            lookup: Box::new(lookup),
        }
    }

    fn variable(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.is_empty())
    }

    fn from_environment(&self) -> Option<CloudCredentials> {
        let access_key = self.variable(ENV_ACCESS_KEY_ID)?;
        let secret_key = self.variable(ENV_SECRET_ACCESS_KEY)?;
        let credentials = CloudCredentials::new(access_key, secret_key);
        Some(match self.variable(ENV_SESSION_TOKEN) {
            Some(token) => credentials.with_session_token(token),
            None => credentials,
        })
    }

    fn from_configuration(&self) -> Option<CloudCredentials> {
        let access_key = self.config.access_key_id().filter(|v| !v.is_empty())?;
        let secret_key = self.config.secret_access_key().filter(|v| !v.is_empty())?;
        let credentials = CloudCredentials::new(access_key, secret_key);
        Some(match self.config.session_token() {
            Some(token) if !token.is_empty() => credentials.with_session_token(token),
            _ => credentials,
        })
    }
}

impl CredentialProvider for EnvironmentCredential {
    fn credentials(&self) -> Result<CloudCredentials> {
        if let Some(credentials) = self.from_environment() {
            debug!(access_key = %credentials.masked_access_key(), "Using environment credentials");
            return Ok(credentials);
        }
        if let Some(credentials) = self.from_configuration() {
            debug!(access_key = %credentials.masked_access_key(), "Using configured credentials");
            return Ok(credentials);
        }
        Err(Error::credential(format!(
            "no credentials found: set {ENV_ACCESS_KEY_ID} and {ENV_SECRET_ACCESS_KEY} or configure credentials"
        )))
    }
}

impl fmt::Debug for EnvironmentCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentCredential").finish_non_exhaustive()
    }
}
