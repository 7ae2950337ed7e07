//! Object-storage backup repository

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use serde_json::json;
use shepherd_domain::constants::{
    S3_REPOSITORY_TYPE, SNAPSHOT_NAME_PREFIX, SNAPSHOT_TIMESTAMP_FORMAT,
};
use shepherd_domain::error::{Error, Result};
use shepherd_domain::ports::{
    BackupRepository, BackupRepositorySettings, ConfigurationProvider, CredentialProvider,
};
use shepherd_domain::value_objects::RepositoryRegistration;
use tracing::info;

/// Repository settings derived from the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3RepositorySettings {
    repository_name: String,
    bucket: String,
    base_path: String,
    region: String,
}

impl S3RepositorySettings {
    /// Settings read from `config`
    pub fn from_config(config: &dyn ConfigurationProvider) -> Self {
        Self {
            repository_name: config.backup_repository_name().to_string(),
            bucket: config.backup_bucket().to_string(),
            base_path: config.backup_base_path().trim_matches('/').to_string(),
            region: config.region().to_string(),
        }
    }
}

impl BackupRepositorySettings for S3RepositorySettings {
    fn repository_type(&self) -> &str {
        S3_REPOSITORY_TYPE
    }

    fn repository_name(&self) -> &str {
        &self.repository_name
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn to_settings(&self) -> serde_json::Value {
        json!({
            "bucket": self.bucket,
            "base_path": self.base_path,
            "region": self.region,
        })
    }
}

/// Backup repository in an object-storage bucket
///
/// The registration is built on first use and cached for the life of the
/// repository.
pub struct S3Repository {
    settings: Arc<dyn BackupRepositorySettings>,
    credentials: Arc<dyn CredentialProvider>,
    registration: OnceLock<RepositoryRegistration>,
}

impl S3Repository {
    /// Create a repository from its settings and credential source
    pub fn new(
        settings: Arc<dyn BackupRepositorySettings>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            settings,
            credentials,
            registration: OnceLock::new(),
        }
    }

    /// Whether the repository has been registered
    pub fn is_registered(&self) -> bool {
        self.registration.get().is_some()
    }
}

impl BackupRepository for S3Repository {
    fn repository_type(&self) -> &str {
        self.settings.repository_type()
    }

    fn ensure_registered(&self) -> Result<RepositoryRegistration> {
        if let Some(registration) = self.registration.get() {
            return Ok(registration.clone());
        }

        if self.settings.bucket().trim().is_empty() {
            return Err(Error::backup(format!(
                "repository {} has no bucket configured",
                self.settings.repository_name()
            )));
        }
        let credentials = self.credentials.credentials().map_err(|err| {
            Error::backup_with_source(
                format!(
                    "repository {} cannot be registered without credentials",
                    self.settings.repository_name()
                ),
                err,
            )
        })?;

        let registration = RepositoryRegistration {
            name: self.settings.repository_name().to_string(),
            repository_type: self.settings.repository_type().to_string(),
            settings: self.settings.to_settings(),
            registered_at: Utc::now(),
        };
        let registration = self.registration.get_or_init(|| registration).clone();
        info!(
            repository = %registration.name,
            bucket = self.settings.bucket(),
            access_key = %credentials.masked_access_key(),
            "Backup repository registered"
        );
        Ok(registration)
    }

    fn snapshot_name(&self, at: DateTime<Utc>) -> String {
        format!(
            "{SNAPSHOT_NAME_PREFIX}-{}",
            at.format(SNAPSHOT_TIMESTAMP_FORMAT)
        )
    }
}

impl std::fmt::Debug for S3Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Repository")
            .field("repository", &self.settings.repository_name())
            .field("bucket", &self.settings.bucket())
            .field("registered", &self.is_registered())
            .finish()
    }
}
