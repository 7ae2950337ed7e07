//! Capability Registry
//!
//! Collects the capability bindings and mount points declared by modules.
//! Declarations are collected lazily: nothing is validated or constructed
//! here. Duplicate detection and construction happen in the assembler, so a
//! module may declare bindings in any order.
//!
//! ## Keys
//!
//! A capability is identified by its type (`TypeId` of the trait object or
//! concrete type) plus an optional qualifier, so `dyn BackupRepository` and
//! `dyn BackupRepository` named `"s3"` are distinct capabilities.
//!
//! ```text
//! registry.bind::<dyn BackupRepository>()      ──► CapabilityKey { dyn BackupRepository, Some("s3") }
//!         .named("s3")                                   │
//!         .to::<S3Repository, _>(factory)                ▼
//!                                               CapabilityBinding { key, implementation, scope, factory }
//! ```

use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use super::error::ResolveError;
use super::resolver::Resolver;

/// Type-erased instance held by the container; always wraps an `Arc<C>`
pub(crate) type Instance = Arc<dyn Any + Send + Sync>;

/// Type-erased factory producing an [`Instance`]
pub(crate) type ErasedFactory =
    Arc<dyn Fn(&Resolver<'_>) -> Result<Instance, ResolveError> + Send + Sync>;

/// Composite key of a capability: its type tag plus an optional qualifier
#[derive(Clone)]
pub struct CapabilityKey {
    type_id: TypeId,
    type_name: &'static str,
    qualifier: Option<String>,
}

impl CapabilityKey {
    /// Key of the unqualified capability `C`
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            type_name: type_name::<C>(),
            qualifier: None,
        }
    }

    /// Key of capability `C` bound under `qualifier`
    pub fn named<C: ?Sized + 'static>(qualifier: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            ..Self::of::<C>()
        }
    }

    pub(crate) fn qualified<C: ?Sized + 'static>(qualifier: Option<String>) -> Self {
        Self {
            qualifier,
            ..Self::of::<C>()
        }
    }

    /// Rust type name of the capability
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Qualifier, for named bindings
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Whether this key names capability type `C` (with any qualifier)
    pub fn is<C: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<C>()
    }
}

impl PartialEq for CapabilityKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.qualifier == other.qualifier
    }
}

impl Eq for CapabilityKey {}

impl Hash for CapabilityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.qualifier.hash(state);
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{} (named \"{qualifier}\")", self.type_name),
            None => f.write_str(self.type_name),
        }
    }
}

impl fmt::Debug for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapabilityKey({self})")
    }
}

/// Lifetime of instances produced by a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Constructed once while the container is assembled and shared by every requester
    #[default]
    Singleton,
    /// Constructed anew on every request
    Transient,
}

/// Association of a capability with the implementation that satisfies it
#[derive(Clone)]
pub struct CapabilityBinding {
    key: CapabilityKey,
    implementation: &'static str,
    scope: Scope,
    module: &'static str,
    factory: ErasedFactory,
}

impl CapabilityBinding {
    /// The capability this binding satisfies
    pub fn key(&self) -> &CapabilityKey {
        &self.key
    }

    /// Name of the implementation
    pub fn implementation(&self) -> &'static str {
        self.implementation
    }

    /// Lifetime of produced instances
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Module that declared the binding
    pub fn module(&self) -> &'static str {
        self.module
    }

    pub(crate) fn factory(&self) -> &ErasedFactory {
        &self.factory
    }
}

impl fmt::Debug for CapabilityBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityBinding")
            .field("key", &self.key)
            .field("implementation", &self.implementation)
            .field("scope", &self.scope)
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

/// A URL prefix served by a dispatcher capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    prefix: String,
    dispatcher: CapabilityKey,
    params: BTreeMap<String, String>,
}

impl MountPoint {
    /// Mount `dispatcher` under `prefix` with a parameter bag
    pub fn new(
        prefix: impl Into<String>,
        dispatcher: CapabilityKey,
        params: BTreeMap<String, String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            dispatcher,
            params,
        }
    }

    /// URL prefix, without the wildcard
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Capability serving the prefix
    pub fn dispatcher(&self) -> &CapabilityKey {
        &self.dispatcher
    }

    /// Parameter bag handed to the dispatcher
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Single parameter lookup
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The wildcard route covering every path under the prefix
    pub fn route_pattern(&self) -> String {
        format!("{}/*", self.prefix.trim_end_matches('/'))
    }
}

/// Collects bindings and mount points declared by modules
#[derive(Default)]
pub struct CapabilityRegistry {
    bindings: Vec<CapabilityBinding>,
    mounts: Vec<MountPoint>,
    current_module: &'static str,
}

impl CapabilityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a binding for capability `C`
    pub fn bind<C>(&mut self) -> BindingBuilder<'_, C>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        BindingBuilder {
            registry: self,
            qualifier: None,
            scope: Scope::default(),
            _capability: PhantomData,
        }
    }

    /// Declare that `implementation`, built by `factory`, satisfies capability `C`
    pub fn register<C, F>(
        &mut self,
        implementation: &'static str,
        qualifier: Option<&str>,
        scope: Scope,
        factory: F,
    ) where
        C: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<C>, ResolveError> + Send + Sync + 'static,
    {
        let factory: ErasedFactory = Arc::new(move |resolver: &Resolver<'_>| {
            factory(resolver).map(|instance| Arc::new(instance) as Instance)
        });
        self.bindings.push(CapabilityBinding {
            key: CapabilityKey::qualified::<C>(qualifier.map(str::to_string)),
            implementation,
            scope,
            module: self.current_module,
            factory,
        });
    }

    /// Declare a mount point
    pub fn mount(&mut self, mount: MountPoint) {
        self.mounts.push(mount);
    }

    /// Bindings declared so far, in declaration order
    pub fn bindings(&self) -> &[CapabilityBinding] {
        &self.bindings
    }

    /// Mount points declared so far
    pub fn mount_points(&self) -> &[MountPoint] {
        &self.mounts
    }

    pub(crate) fn enter_module(&mut self, module: &'static str) {
        self.current_module = module;
    }

    pub(crate) fn into_parts(self) -> (Vec<CapabilityBinding>, Vec<MountPoint>) {
        (self.bindings, self.mounts)
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("bindings", &self.bindings.len())
            .field("mounts", &self.mounts)
            .finish()
    }
}

/// Fluent declaration of a single binding
#[must_use = "a binding is only declared once `to`, `to_factory` or `to_instance` is called"]
pub struct BindingBuilder<'r, C: ?Sized> {
    registry: &'r mut CapabilityRegistry,
    qualifier: Option<String>,
    scope: Scope,
    _capability: PhantomData<fn() -> Arc<C>>,
}

impl<C> BindingBuilder<'_, C>
where
    C: ?Sized + Send + Sync + 'static,
{
    /// Qualify the binding with a name
    pub fn named(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Set the instance lifetime
    pub fn in_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Construct a fresh instance on every request
    pub fn transient(self) -> Self {
        self.in_scope(Scope::Transient)
    }

    /// Bind to implementation `I`, built by `factory`
    pub fn to<I, F>(self, factory: F)
    where
        I: ?Sized + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<C>, ResolveError> + Send + Sync + 'static,
    {
        self.to_factory(type_name::<I>(), factory);
    }

    /// Bind to an implementation identified by name, built by `factory`
    pub fn to_factory<F>(self, implementation: &'static str, factory: F)
    where
        F: Fn(&Resolver<'_>) -> Result<Arc<C>, ResolveError> + Send + Sync + 'static,
    {
        let Self {
            registry,
            qualifier,
            scope,
            ..
        } = self;
        registry.register::<C, F>(implementation, qualifier.as_deref(), scope, factory);
    }

    /// Bind to an already constructed instance; always singleton-scoped
    pub fn to_instance(self, instance: Arc<C>) {
        self.in_scope(Scope::Singleton)
            .to_factory("instance", move |_: &Resolver<'_>| Ok(Arc::clone(&instance)));
    }
}
