//! Capability resolution
//!
//! A [`Resolution`] walks the binding graph on demand: a factory asks its
//! [`Resolver`] for collaborators, which are constructed first (singletons
//! once, transients every time). The stack of capabilities under
//! construction detects cycles.
//!
//! [`Deferred`] is the late-lookup handle: it keeps a weak reference to the
//! container that is filled in once assembly finishes, so a singleton can
//! reach collaborators after startup without owning the container.

use std::any::type_name;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use super::container::{Container, ContainerHandle};
use super::error::{ConfigurationError, ResolveError};
use super::registry::{CapabilityBinding, CapabilityKey, Instance, Scope};

/// Where singleton instances are read from
enum Singletons<'c> {
    /// Assembly in progress: singletons are created on first request
    Building(RefCell<HashMap<CapabilityKey, Instance>>),
    /// Assembled container: every singleton already exists
    Frozen(&'c HashMap<CapabilityKey, Instance>),
}

/// One pass of capability resolution over a set of bindings
pub(crate) struct Resolution<'c> {
    bindings: &'c HashMap<CapabilityKey, CapabilityBinding>,
    singletons: Singletons<'c>,
    in_progress: RefCell<Vec<CapabilityKey>>,
    handle: &'c ContainerHandle,
}

impl<'c> Resolution<'c> {
    /// Resolution that constructs and records singletons
    pub(crate) fn building(
        bindings: &'c HashMap<CapabilityKey, CapabilityBinding>,
        handle: &'c ContainerHandle,
    ) -> Self {
        Self {
            bindings,
            singletons: Singletons::Building(RefCell::new(HashMap::new())),
            in_progress: RefCell::new(Vec::new()),
            handle,
        }
    }

    /// Resolution over an assembled container
    pub(crate) fn frozen(
        bindings: &'c HashMap<CapabilityKey, CapabilityBinding>,
        singletons: &'c HashMap<CapabilityKey, Instance>,
        handle: &'c ContainerHandle,
    ) -> Self {
        Self {
            bindings,
            singletons: Singletons::Frozen(singletons),
            in_progress: RefCell::new(Vec::new()),
            handle,
        }
    }

    /// Singletons constructed so far
    pub(crate) fn into_singletons(self) -> HashMap<CapabilityKey, Instance> {
        match self.singletons {
            Singletons::Building(cell) => cell.into_inner(),
            Singletons::Frozen(map) => map.clone(),
        }
    }

    /// Resolve `key`, constructing it (and its collaborators) when needed
    pub(crate) fn resolve(
        &self,
        key: &CapabilityKey,
        requester: Option<&CapabilityKey>,
    ) -> Result<Instance, ResolveError> {
        let binding = self
            .bindings
            .get(key)
            .ok_or_else(|| ConfigurationError::Unsatisfied {
                key: key.clone(),
                required_by: requester.map(ToString::to_string),
            })?;

        if binding.scope() == Scope::Transient {
            return self.construct(binding);
        }

        match &self.singletons {
            Singletons::Frozen(singletons) => singletons.get(key).cloned().ok_or_else(|| {
                ConfigurationError::Unsatisfied {
                    key: key.clone(),
                    required_by: requester.map(ToString::to_string),
                }
                .into()
            }),
            Singletons::Building(cell) => {
                if let Some(instance) = cell.borrow().get(key) {
                    return Ok(Arc::clone(instance));
                }
                let instance = self.construct(binding)?;
                cell.borrow_mut().insert(key.clone(), Arc::clone(&instance));
                Ok(instance)
            }
        }
    }

    fn construct(&self, binding: &CapabilityBinding) -> Result<Instance, ResolveError> {
        let key = binding.key();
        {
            let mut in_progress = self.in_progress.borrow_mut();
            if let Some(start) = in_progress.iter().position(|pending| pending == key) {
                let mut path: Vec<String> =
                    in_progress[start..].iter().map(ToString::to_string).collect();
                path.push(key.to_string());
                return Err(ConfigurationError::CircularDependency { path }.into());
            }
            in_progress.push(key.clone());
        }

        debug!(
            capability = %key,
            implementation = binding.implementation(),
            scope = ?binding.scope(),
            "Constructing capability"
        );
        let resolver = Resolver {
            resolution: self,
            requester: key,
        };
        let result = (binding.factory())(&resolver);
        self.in_progress.borrow_mut().pop();

        result.map_err(|error| match error {
            ResolveError::Failed(source) => ResolveError::Construction {
                key: key.clone(),
                source,
            },
            other => other,
        })
    }
}

/// Handed to factories to request collaborators
pub struct Resolver<'a> {
    resolution: &'a Resolution<'a>,
    requester: &'a CapabilityKey,
}

impl Resolver<'_> {
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

    /// Late lookup of capability `C`, resolved on each [`Deferred::get`]
    pub fn deferred<C>(&self) -> Deferred<C>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        Deferred::new(CapabilityKey::of::<C>(), self.container())
    }

    /// Late lookup of capability `C` bound under `qualifier`
    pub fn deferred_named<C>(&self, qualifier: &str) -> Deferred<C>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        Deferred::new(CapabilityKey::named::<C>(qualifier), self.container())
    }

    /// Late-bound reference to the container being assembled
    pub fn container(&self) -> ContainerRef {
        ContainerRef {
            handle: Arc::clone(self.resolution.handle),
        }
    }

    /// The capability being constructed
    pub fn requester(&self) -> &CapabilityKey {
        self.requester
    }

    fn resolve<C>(&self, key: &CapabilityKey) -> Result<Arc<C>, ResolveError>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let instance = self.resolution.resolve(key, Some(self.requester))?;
        downcast::<C>(key, &instance)
    }
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("requester", self.requester)
            .finish_non_exhaustive()
    }
}

pub(crate) fn downcast<C>(key: &CapabilityKey, instance: &Instance) -> Result<Arc<C>, ResolveError>
where
    C: ?Sized + Send + Sync + 'static,
{
    instance
        .as_ref()
        .downcast_ref::<Arc<C>>()
        .cloned()
        .ok_or_else(|| {
            ConfigurationError::TypeMismatch {
                key: key.clone(),
                expected: type_name::<C>(),
            }
            .into()
        })
}

/// Weak, late-bound reference to an assembled container
#[derive(Clone)]
pub struct ContainerRef {
    handle: ContainerHandle,
}

impl ContainerRef {
    pub(crate) fn new(handle: ContainerHandle) -> Self {
        Self { handle }
    }

    /// The container, if assembly finished and it is still alive
    pub fn upgrade(&self) -> Option<Container> {
        self.handle
            .get()
            .and_then(std::sync::Weak::upgrade)
            .map(Container::from_inner)
    }

    /// Resolve capability `C` through the container
    pub fn get<C>(&self) -> Result<Arc<C>, ResolveError>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.resolve_key(&CapabilityKey::of::<C>())
    }

    /// Resolve capability `C` bound under `qualifier` through the container
    pub fn get_named<C>(&self, qualifier: &str) -> Result<Arc<C>, ResolveError>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.resolve_key(&CapabilityKey::named::<C>(qualifier))
    }

    fn resolve_key<C>(&self, key: &CapabilityKey) -> Result<Arc<C>, ResolveError>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let container = self
            .upgrade()
            .ok_or_else(|| ConfigurationError::ContainerUnavailable { key: key.clone() })?;
        container.get_keyed::<C>(key)
    }
}

impl fmt::Debug for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerRef")
            .field("available", &self.upgrade().is_some())
            .finish()
    }
}

/// Late lookup of a capability
///
/// Resolution happens on every [`get`](Self::get), after the container is
/// assembled; a missing binding surfaces there rather than at build time.
pub struct Deferred<C: ?Sized> {
    key: CapabilityKey,
    container: ContainerRef,
    _capability: PhantomData<fn() -> Arc<C>>,
}

impl<C> Deferred<C>
where
    C: ?Sized + Send + Sync + 'static,
{
    pub(crate) fn new(key: CapabilityKey, container: ContainerRef) -> Self {
        Self {
            key,
            container,
            _capability: PhantomData,
        }
    }

    /// The capability this handle resolves
    pub fn key(&self) -> &CapabilityKey {
        &self.key
    }

    /// Resolve the capability now
    pub fn get(&self) -> Result<Arc<C>, ResolveError> {
        self.container.resolve_key::<C>(&self.key)
    }
}

impl<C: ?Sized> Clone for Deferred<C> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            container: self.container.clone(),
            _capability: PhantomData,
        }
    }
}

impl<C: ?Sized> fmt::Debug for Deferred<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").field("key", &self.key).finish()
    }
}
