//! Dependency injection errors
//!
//! | Error | Raised by |
//! |-------|-----------|
//! | [`ConfigurationError`] | invalid bindings: duplicates, unsatisfied or circular requests, duplicate mounts |
//! | [`ResolveError`] | a single capability lookup |
//! | [`AssemblyError`] | [`build`](super::build) |
//! | [`StartupError`] | [`start`](super::start) and [`bootstrap`](super::bootstrap) |

use thiserror::Error;

use super::registry::CapabilityKey;

/// Invalid capability bindings
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The same (capability, qualifier) pair was bound twice
    #[error("duplicate binding for {key} (declared by {first_module} and {second_module})")]
    DuplicateBinding {
        /// The capability bound twice
        key: CapabilityKey,
        /// Module that declared the first binding
        first_module: &'static str,
        /// Module that declared the second binding
        second_module: &'static str,
    },

    /// No binding satisfies a requested capability
    #[error("no binding for {key}{}", requester(.required_by.as_deref()))]
    Unsatisfied {
        /// The requested capability
        key: CapabilityKey,
        /// The capability whose factory made the request
        required_by: Option<String>,
    },

    /// Factories requested each other in a cycle
    #[error("circular dependency: {}", .path.join(" -> "))]
    CircularDependency {
        /// Capabilities on the cycle, first and last entry equal
        path: Vec<String>,
    },

    /// The binding does not produce the requested type
    #[error("binding for {key} does not produce {expected}")]
    TypeMismatch {
        /// The binding's capability
        key: CapabilityKey,
        /// Type the caller asked for
        expected: &'static str,
    },

    /// Two mount points share a prefix
    #[error("duplicate mount point for prefix {prefix}")]
    DuplicateMount {
        /// The contested prefix
        prefix: String,
    },

    /// A deferred lookup ran while no assembled container was alive
    #[error("no container available to resolve {key}")]
    ContainerUnavailable {
        /// The capability being resolved
        key: CapabilityKey,
    },
}

fn requester(required_by: Option<&str>) -> String {
    required_by
        .map(|requester| format!(" (required by {requester})"))
        .unwrap_or_default()
}

/// Failure to resolve a capability
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The bindings cannot satisfy the request
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A factory failed while constructing the capability
    #[error("failed to construct {key}")]
    Construction {
        /// The capability being constructed
        key: CapabilityKey,
        /// Error returned by the factory
        #[source]
        source: shepherd_domain::Error,
    },

    /// Collaborator error raised inside a factory; attributed to the
    /// capability under construction before it leaves the resolver
    #[error(transparent)]
    Failed(#[from] shepherd_domain::Error),
}

impl From<ResolveError> for shepherd_domain::Error {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::Failed(inner) => inner,
            other => Self::configuration_with_source("capability resolution failed", other),
        }
    }
}

/// Failure to assemble a container
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// The declared bindings are invalid
    #[error("invalid capability bindings")]
    Configuration(#[from] ConfigurationError),

    /// An eager singleton could not be constructed
    #[error("failed to construct {key}")]
    Construction {
        /// The capability being constructed
        key: CapabilityKey,
        /// Error returned by the factory
        #[source]
        source: shepherd_domain::Error,
    },
}

impl AssemblyError {
    pub(crate) fn from_resolve(key: &CapabilityKey, error: ResolveError) -> Self {
        match error {
            ResolveError::Configuration(error) => Self::Configuration(error),
            ResolveError::Construction { key, source } => Self::Construction { key, source },
            ResolveError::Failed(source) => Self::Construction {
                key: key.clone(),
                source,
            },
        }
    }
}

/// Kind of a fatal startup failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupErrorKind {
    /// Invalid bindings
    Configuration,
    /// A factory failed
    Construction,
    /// `ServerHandle::initialize` failed
    Initialization,
}

/// The single fatal error of the startup path
#[derive(Debug, Error)]
pub enum StartupError {
    /// The container could not be assembled
    #[error("container assembly failed")]
    Assembly(#[from] AssemblyError),

    /// The server handle could not be resolved from the container
    #[error("server handle could not be resolved")]
    ServerUnresolvable(#[source] ResolveError),

    /// The server handle failed to initialize
    #[error("server initialization failed")]
    Initialization(#[source] shepherd_domain::Error),
}

impl StartupError {
    /// Kind of the underlying failure
    pub fn kind(&self) -> StartupErrorKind {
        match self {
            Self::Assembly(AssemblyError::Configuration(_))
            | Self::ServerUnresolvable(ResolveError::Configuration(_)) => {
                StartupErrorKind::Configuration
            }
            Self::Assembly(AssemblyError::Construction { .. }) | Self::ServerUnresolvable(_) => {
                StartupErrorKind::Construction
            }
            Self::Initialization(_) => StartupErrorKind::Initialization,
        }
    }
}
