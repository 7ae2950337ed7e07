//! Dispatcher parameter bag
//!
//! A mount carries a string-to-string parameter bag. Two keys are understood:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `shepherd.rest.resource-packages` | Packages scanned for resources, separated by `,` or `;` |
//! | `shepherd.rest.filter-context-path` | Prefix of the full request path (mount prefix included) stripped before resource matching |
//!
//! Every other key is carried through unchanged.

use std::collections::BTreeMap;

use shepherd_infrastructure::config::RestConfig;

use crate::constants::{
    REST_FILTER_CONTEXT_PATH_PARAM, REST_PACKAGE_SEPARATORS, REST_RESOURCE_PACKAGES_PARAM,
};

/// Parsed dispatcher parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatcherConfig {
    resource_packages: Vec<String>,
    filter_context_path: Option<String>,
    extra: BTreeMap<String, String>,
}

impl DispatcherConfig {
    /// Empty configuration: no package is scanned
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a parameter bag
    pub fn from_params(params: &BTreeMap<String, String>) -> Self {
        let mut config = Self::new();
        for (key, value) in params {
            match key.as_str() {
                REST_RESOURCE_PACKAGES_PARAM => {
                    config.resource_packages = split_packages(value);
                }
                REST_FILTER_CONTEXT_PATH_PARAM => {
                    config.filter_context_path = normalize_path(value);
                }
                _ => {
                    config.extra.insert(key.clone(), value.clone());
                }
            }
        }
        config
    }

    /// Configuration of the REST mount from the application config
    pub fn from_rest_config(rest: &RestConfig) -> Self {
        let mut config = Self::new();
        for package in &rest.resource_packages {
            config = config.with_resource_package(package);
        }
        match &rest.filter_context_path {
            Some(path) => config.with_filter_context_path(path),
            None => config,
        }
    }

    /// Add a scanned package
    #[must_use]
    pub fn with_resource_package(mut self, package: impl AsRef<str>) -> Self {
        self.resource_packages
            .extend(split_packages(package.as_ref()));
        self
    }

    /// Set the filter context path
    #[must_use]
    pub fn with_filter_context_path(mut self, path: impl AsRef<str>) -> Self {
        self.filter_context_path = normalize_path(path.as_ref());
        self
    }

    /// Carry an additional parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            REST_RESOURCE_PACKAGES_PARAM => self.resource_packages = split_packages(&value),
            REST_FILTER_CONTEXT_PATH_PARAM => self.filter_context_path = normalize_path(&value),
            _ => {
                self.extra.insert(key, value);
            }
        }
        self
    }

    /// Packages scanned for resources
    pub fn resource_packages(&self) -> &[String] {
        &self.resource_packages
    }

    /// Filter context path, without surrounding slashes
    pub fn filter_context_path(&self) -> Option<&str> {
        self.filter_context_path.as_deref()
    }

    /// An unrecognized parameter
    pub fn param(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// Render back into a parameter bag
    pub fn to_params(&self) -> BTreeMap<String, String> {
        let mut params = self.extra.clone();
        if !self.resource_packages.is_empty() {
            params.insert(
                REST_RESOURCE_PACKAGES_PARAM.to_string(),
                self.resource_packages.join(","),
            );
        }
        if let Some(path) = &self.filter_context_path {
            params.insert(REST_FILTER_CONTEXT_PATH_PARAM.to_string(), path.clone());
        }
        params
    }
}

fn split_packages(value: &str) -> Vec<String> {
    value
        .split(REST_PACKAGE_SEPARATORS)
        .map(str::trim)
        .filter(|package| !package.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_path(value: &str) -> Option<String> {
    let trimmed = value.trim().trim_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
