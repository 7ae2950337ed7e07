//! Dependency Injection - Capability Registry and Composition Root
//!
//! Modules declare which implementation satisfies each capability; the
//! assembler validates the declarations, constructs every singleton and
//! freezes them into an immutable [`Container`]; the startup sequencer then
//! initializes the server.
//!
//! ```text
//! Module::configure ──► CapabilityRegistry ──build()──► Container ──start()──► ServerHandle::initialize
//!                            │                              │
//!                       bindings + mounts           singletons (Arc), transients per request
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let modules: Vec<Box<dyn Module>> = vec![
//!     Box::new(SidecarModule::new(config.clone())),
//!     Box::new(ServerModule),
//! ];
//! let container = bootstrap(&modules)?;
//! let repository = container.get_named::<dyn BackupRepository>("s3")?;
//! ```

pub mod assembler;
pub mod container;
pub mod error;
pub mod module;
pub mod modules;
pub mod registry;
pub mod resolver;
pub mod startup;

pub use assembler::{ContainerBuilder, build};
pub use container::Container;
pub use error::{AssemblyError, ConfigurationError, ResolveError, StartupError, StartupErrorKind};
pub use module::Module;
pub use registry::{
    BindingBuilder, CapabilityBinding, CapabilityKey, CapabilityRegistry, MountPoint, Scope,
};
pub use resolver::{ContainerRef, Deferred, Resolver};
pub use startup::{bootstrap, start};
