//! Assembler - turns module declarations into a container
//!
//! ```text
//! modules ──configure──► CapabilityRegistry ──validate──► bindings + mounts
//!                                                              │
//!                                       eager singletons ◄─────┘
//!                                              │
//!                                              ▼
//!                                          Container
//! ```
//!
//! Any failure aborts the build: no partial container is ever returned.

use std::collections::{HashMap, HashSet};

use tracing::{debug, error, info};

use super::container::{Container, ContainerHandle, ContainerInner};
use super::error::{AssemblyError, ConfigurationError};
use super::module::Module;
use super::registry::{CapabilityBinding, CapabilityKey, CapabilityRegistry, MountPoint, Scope};
use super::resolver::Resolution;
use crate::error_ext::error_chain;

/// Collects modules and assembles them into a [`Container`]
#[derive(Default)]
pub struct ContainerBuilder {
    modules: Vec<Box<dyn Module>>,
}

impl ContainerBuilder {
    /// Create a builder with no modules
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module
    #[must_use]
    pub fn with_module<M: Module + 'static>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Add a boxed module
    pub fn add_module(&mut self, module: Box<dyn Module>) {
        self.modules.push(module);
    }

    /// Modules added so far
    pub fn modules(&self) -> &[Box<dyn Module>] {
        &self.modules
    }

    /// Assemble the container
    pub fn build(self) -> Result<Container, AssemblyError> {
        build(&self.modules)
    }
}

/// Assemble `modules` into a container
///
/// # Errors
///
/// [`AssemblyError::Configuration`] for duplicate bindings, duplicate or
/// unbound mount points, unsatisfied or circular requests;
/// [`AssemblyError::Construction`] when an eager singleton's factory fails.
pub fn build(modules: &[Box<dyn Module>]) -> Result<Container, AssemblyError> {
    info!(modules = modules.len(), "Assembling container");

    let mut registry = CapabilityRegistry::new();
    for module in modules {
        debug!(module = module.name(), "Configuring module");
        registry.enter_module(module.name());
        module.configure(&mut registry);
    }

    let (declared, mounts) = registry.into_parts();
    let eager: Vec<CapabilityKey> = declared
        .iter()
        .filter(|binding| binding.scope() == Scope::Singleton)
        .map(|binding| binding.key().clone())
        .collect();

    let bindings = index_bindings(declared).map_err(report)?;
    validate_mounts(&mounts, &bindings).map_err(report)?;

    let handle = ContainerHandle::default();
    let singletons = {
        let resolution = Resolution::building(&bindings, &handle);
        for key in &eager {
            resolution.resolve(key, None).map_err(|err| {
                let err = AssemblyError::from_resolve(key, err);
                error!(capability = %key, error = %error_chain(&err), "Container assembly failed");
                err
            })?;
        }
        resolution.into_singletons()
    };

    info!(
        bindings = bindings.len(),
        singletons = singletons.len(),
        mounts = mounts.len(),
        "Container assembled"
    );

    Ok(Container::assemble(ContainerInner {
        bindings,
        singletons,
        mounts,
        handle,
    }))
}

fn report(err: ConfigurationError) -> AssemblyError {
    let err = AssemblyError::Configuration(err);
    error!(error = %error_chain(&err), "Container assembly failed");
    err
}

fn index_bindings(
    declared: Vec<CapabilityBinding>,
) -> Result<HashMap<CapabilityKey, CapabilityBinding>, ConfigurationError> {
    let mut bindings: HashMap<CapabilityKey, CapabilityBinding> =
        HashMap::with_capacity(declared.len());
    for binding in declared {
        if let Some(existing) = bindings.get(binding.key()) {
            return Err(ConfigurationError::DuplicateBinding {
                key: binding.key().clone(),
                first_module: existing.module(),
                second_module: binding.module(),
            });
        }
        bindings.insert(binding.key().clone(), binding);
    }
    Ok(bindings)
}

fn validate_mounts(
    mounts: &[MountPoint],
    bindings: &HashMap<CapabilityKey, CapabilityBinding>,
) -> Result<(), ConfigurationError> {
    let mut prefixes = HashSet::with_capacity(mounts.len());
    for mount in mounts {
        if !prefixes.insert(mount.prefix()) {
            return Err(ConfigurationError::DuplicateMount {
                prefix: mount.prefix().to_string(),
            });
        }
        if !bindings.contains_key(mount.dispatcher()) {
            return Err(ConfigurationError::Unsatisfied {
                key: mount.dispatcher().clone(),
                required_by: Some(format!("mount point {}", mount.route_pattern())),
            });
        }
    }
    Ok(())
}
