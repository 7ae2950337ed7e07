//! Deferred Lookup Tests

use std::sync::{Arc, Mutex};

use shepherd_infrastructure::di::{
    CapabilityRegistry, ConfigurationError, Deferred, ResolveError, build,
};

use super::fakes::{English, FnModule, Greeter, boxed};

/// Holds a late lookup of the greeter
struct Lobby {
    greeter: Deferred<dyn Greeter>,
}

#[test]
fn test_deferred_resolves_after_assembly() {
    let container = build(&[boxed(FnModule("lobby", |registry: &mut CapabilityRegistry| {
        registry.bind::<Lobby>().to::<Lobby, _>(|r| {
            Ok(Arc::new(Lobby {
                greeter: r.deferred::<dyn Greeter>(),
            }))
        });
        registry.bind::<dyn Greeter>().to_instance(Arc::new(English));
    }))])
    .unwrap();

    let lobby = container.get::<Lobby>().unwrap();
    let through_lobby = lobby.greeter.get().unwrap();
    let direct = container.get::<dyn Greeter>().unwrap();

    assert!(Arc::ptr_eq(&through_lobby, &direct));
}

#[test]
fn test_deferred_missing_binding_surfaces_on_get_not_build() {
    let container = build(&[boxed(FnModule("lobby", |registry: &mut CapabilityRegistry| {
        registry.bind::<Lobby>().to::<Lobby, _>(|r| {
            Ok(Arc::new(Lobby {
                greeter: r.deferred_named::<dyn Greeter>("fr"),
            }))
        });
    }))])
    .expect("a deferred lookup is not validated at build time");

    let lobby = container.get::<Lobby>().unwrap();
    let err = lobby.greeter.get().err().expect("lookup should fail");

    assert!(matches!(
        err,
        ResolveError::Configuration(ConfigurationError::Unsatisfied { .. })
    ));
    assert!(err.to_string().contains("\"fr\""), "{err}");
}

#[test]
fn test_deferred_is_unavailable_during_assembly() {
    let observed: Arc<Mutex<Option<bool>>> = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&observed);

    build(&[boxed(FnModule("eager", move |registry: &mut CapabilityRegistry| {
        let slot = Arc::clone(&slot);
        registry.bind::<dyn Greeter>().to_instance(Arc::new(English));
        registry.bind::<Lobby>().to::<Lobby, _>(move |r| {
            let greeter = r.deferred::<dyn Greeter>();
            let unavailable = matches!(
                greeter.get(),
                Err(ResolveError::Configuration(
                    ConfigurationError::ContainerUnavailable { .. }
                ))
            );
            *slot.lock().unwrap() = Some(unavailable);
            Ok(Arc::new(Lobby { greeter }))
        });
    }))])
    .unwrap();

    assert_eq!(*observed.lock().unwrap(), Some(true));
}

#[test]
fn test_deferred_does_not_keep_container_alive() {
    let container = build(&[boxed(FnModule("lobby", |registry: &mut CapabilityRegistry| {
        registry.bind::<Lobby>().to::<Lobby, _>(|r| {
            Ok(Arc::new(Lobby {
                greeter: r.deferred::<dyn Greeter>(),
            }))
        });
        registry.bind::<dyn Greeter>().to_instance(Arc::new(English));
    }))])
    .unwrap();

    let lobby = container.get::<Lobby>().unwrap();
    let container_ref = container.container_ref();
    assert!(container_ref.upgrade().is_some());

    drop(container);

    assert!(container_ref.upgrade().is_none());
    assert!(matches!(
        lobby.greeter.get(),
        Err(ResolveError::Configuration(
            ConfigurationError::ContainerUnavailable { .. }
        ))
    ));
}

#[test]
fn test_container_ref_resolves_capabilities() {
    let container = build(&[boxed(FnModule("greeters", |registry: &mut CapabilityRegistry| {
        registry.bind::<dyn Greeter>().to_instance(Arc::new(English));
    }))])
    .unwrap();

    let container_ref = container.container_ref();
    assert_eq!(container_ref.get::<dyn Greeter>().unwrap().greet(), "hello");
    assert!(container_ref.get_named::<dyn Greeter>("fr").is_err());
}
