//! Assembled, immutable container
//!
//! Produced by [`build`](super::build). Singletons live here as owned `Arc`
//! handles; transients are constructed per request. Cloning a container is
//! cheap and every clone shares the same instances.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use super::error::{ConfigurationError, ResolveError};
use super::registry::{CapabilityBinding, CapabilityKey, Instance, MountPoint};
use super::resolver::{ContainerRef, Resolution, downcast};

/// Late-bound slot pointing back at the container once it exists
pub(crate) type ContainerHandle = Arc<OnceLock<Weak<ContainerInner>>>;

pub(crate) struct ContainerInner {
    pub(crate) bindings: HashMap<CapabilityKey, CapabilityBinding>,
    pub(crate) singletons: HashMap<CapabilityKey, Instance>,
    pub(crate) mounts: Vec<MountPoint>,
    pub(crate) handle: ContainerHandle,
}

/// The assembled object graph
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

impl Container {
    /// Freeze `inner` and point its late-bound handle at it
    pub(crate) fn assemble(inner: ContainerInner) -> Self {
        let inner = Arc::new(inner);
        // The handle is created fresh for each assembly and set only here.
        let _ = inner.handle.set(Arc::downgrade(&inner));
        Self { inner }
    }

    pub(crate) fn from_inner(inner: Arc<ContainerInner>) -> Self {
        Self { inner }
    }

    /// Resolve the unqualified capability `C`
    pub fn get<C>(&self) -> Result<Arc<C>, ResolveError>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.resolve(&CapabilityKey::of::<C>())
    }

    /// Resolve capability `C` bound under `qualifier`
    pub fn get_named<C>(&self, qualifier: &str) -> Result<Arc<C>, ResolveError>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.resolve(&CapabilityKey::named::<C>(qualifier))
    }

    /// Resolve `key`, which must name capability type `C`
    pub fn get_keyed<C>(&self, key: &CapabilityKey) -> Result<Arc<C>, ResolveError>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        if !key.is::<C>() {
            return Err(ConfigurationError::TypeMismatch {
                key: key.clone(),
                expected: std::any::type_name::<C>(),
            }
            .into());
        }
        self.resolve(key)
    }

    fn resolve<C>(&self, key: &CapabilityKey) -> Result<Arc<C>, ResolveError>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let resolution = Resolution::frozen(
            &self.inner.bindings,
            &self.inner.singletons,
            &self.inner.handle,
        );
        let instance = resolution.resolve(key, None)?;
        downcast::<C>(key, &instance)
    }

    /// Whether the unqualified capability `C` is bound
    pub fn contains<C: ?Sized + 'static>(&self) -> bool {
        self.inner.bindings.contains_key(&CapabilityKey::of::<C>())
    }

    /// Whether capability `C` is bound under `qualifier`
    pub fn contains_named<C: ?Sized + 'static>(&self, qualifier: &str) -> bool {
        self.inner
            .bindings
            .contains_key(&CapabilityKey::named::<C>(qualifier))
    }

    /// Binding registered for `key`
    pub fn binding(&self, key: &CapabilityKey) -> Option<&CapabilityBinding> {
        self.inner.bindings.get(key)
    }

    /// Every binding, in no particular order
    pub fn bindings(&self) -> impl Iterator<Item = &CapabilityBinding> {
        self.inner.bindings.values()
    }

    /// Mount points, in declaration order
    pub fn mount_points(&self) -> &[MountPoint] {
        &self.inner.mounts
    }

    /// Number of constructed singletons
    pub fn singleton_count(&self) -> usize {
        self.inner.singletons.len()
    }

    /// Weak reference to this container
    pub fn container_ref(&self) -> ContainerRef {
        ContainerRef::new(Arc::clone(&self.inner.handle))
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.inner.bindings.len())
            .field("singletons", &self.inner.singletons.len())
            .field("mounts", &self.inner.mounts)
            .finish()
    }
}
