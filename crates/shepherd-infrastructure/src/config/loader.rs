//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables and
//! default values, merged with figment.

use crate::config::AppConfig;
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use shepherd_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix (e.g., `SHEPHERD__SERVER__PORT`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Double underscore separates nested keys (e.g., SHEPHERD__BACKUP__BUCKET)
        figment = figment.merge(
            Env::prefixed(&format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_cluster_config(config)?;
    validate_server_config(config)?;
    validate_backup_config(config)?;
    validate_discovery_config(config)?;
    parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_cluster_config(config: &AppConfig) -> Result<()> {
    if config.cluster.app_name.trim().is_empty() {
        return Err(Error::configuration("Cluster app name cannot be empty"));
    }
    Ok(())
}

fn validate_server_config(config: &AppConfig) -> Result<()> {
    if config.server.port == 0 {
        return Err(Error::configuration("Server port cannot be 0"));
    }
    if !config.server.rest.prefix.starts_with('/') {
        return Err(Error::configuration(format!(
            "REST prefix must start with '/': {}",
            config.server.rest.prefix
        )));
    }
    Ok(())
}

fn validate_backup_config(config: &AppConfig) -> Result<()> {
    if config.backup.snapshot_interval_secs == 0 {
        return Err(Error::configuration("Snapshot interval cannot be 0"));
    }
    if config.backup.enabled && config.backup.bucket.trim().is_empty() {
        return Err(Error::configuration(
            "Backup bucket is required when backup is enabled",
        ));
    }
    Ok(())
}

fn validate_discovery_config(config: &AppConfig) -> Result<()> {
    if config.discovery.refresh_interval_secs == 0 {
        return Err(Error::configuration("Host refresh interval cannot be 0"));
    }
    if config.discovery.timeout_secs == 0 {
        return Err(Error::configuration("Discovery timeout cannot be 0"));
    }
    Ok(())
}
