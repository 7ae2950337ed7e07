//! Assembler Tests

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use shepherd_domain::error::Error;
use shepherd_infrastructure::di::{
    AssemblyError, CapabilityKey, CapabilityRegistry, ConfigurationError, ContainerBuilder,
    MountPoint, Scope, build,
};
use shepherd_infrastructure::error_chain;

use super::fakes::{Counter, English, FnModule, French, Greeter, Numbered, Welcome, boxed};

fn greeter_module(name: &'static str) -> FnModule<impl Fn(&mut CapabilityRegistry) + Send + Sync> {
    FnModule(name, |registry: &mut CapabilityRegistry| {
        registry.bind::<dyn Greeter>().to_instance(Arc::new(English));
    })
}

#[test]
fn test_duplicate_binding_fails_build() {
    let result = build(&[boxed(greeter_module("first")), boxed(greeter_module("second"))]);

    match result {
        Err(AssemblyError::Configuration(ConfigurationError::DuplicateBinding {
            key,
            first_module,
            second_module,
        })) => {
            assert_eq!(key, CapabilityKey::of::<dyn Greeter>());
            assert_eq!(first_module, "first");
            assert_eq!(second_module, "second");
        }
        other => panic!("expected duplicate binding error, got {other:?}"),
    }
}

#[test]
fn test_same_capability_with_distinct_qualifiers_is_not_a_duplicate() {
    let result = build(&[boxed(FnModule("qualified", |registry: &mut CapabilityRegistry| {
        registry.bind::<dyn Greeter>().to_instance(Arc::new(English));
        registry
            .bind::<dyn Greeter>()
            .named("fr")
            .to_instance(Arc::new(French));
    }))]);

    assert!(result.is_ok());
}

#[test]
fn test_registration_order_does_not_affect_resolution() {
    let container = build(&[boxed(FnModule("reversed", |registry: &mut CapabilityRegistry| {
        registry.bind::<Welcome>().to::<Welcome, _>(|r| {
            Ok(Arc::new(Welcome {
                greeter: r.get::<dyn Greeter>()?,
            }))
        });
        registry.bind::<dyn Greeter>().to_instance(Arc::new(English));
    }))])
    .unwrap();

    assert_eq!(container.get::<Welcome>().unwrap().greeter.greet(), "hello");
}

#[test]
fn test_singletons_are_constructed_eagerly_and_once() {
    let constructed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&constructed);
    let container = build(&[boxed(FnModule("eager", move |registry: &mut CapabilityRegistry| {
        let counter = Arc::clone(&counter);
        registry.bind::<dyn Counter>().to::<Numbered, _>(move |_| {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            let instance: Arc<dyn Counter> = Arc::new(Numbered(id));
            Ok(instance)
        });
    }))])
    .unwrap();

    assert_eq!(constructed.load(Ordering::SeqCst), 1);
    container.get::<dyn Counter>().unwrap();
    container.get::<dyn Counter>().unwrap();
    assert_eq!(constructed.load(Ordering::SeqCst), 1);
    assert_eq!(container.singleton_count(), 1);
}

#[test]
fn test_transients_are_not_constructed_at_build() {
    let constructed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&constructed);
    let container = build(&[boxed(FnModule("lazy", move |registry: &mut CapabilityRegistry| {
        let counter = Arc::clone(&counter);
        registry
            .bind::<dyn Counter>()
            .in_scope(Scope::Transient)
            .to::<Numbered, _>(move |_| {
                let id = counter.fetch_add(1, Ordering::SeqCst);
                let instance: Arc<dyn Counter> = Arc::new(Numbered(id));
                Ok(instance)
            });
    }))])
    .unwrap();

    assert_eq!(constructed.load(Ordering::SeqCst), 0);
    container.get::<dyn Counter>().unwrap();
    assert_eq!(constructed.load(Ordering::SeqCst), 1);
    assert_eq!(container.singleton_count(), 0);
}

#[test]
fn test_missing_dependency_fails_build_naming_both_sides() {
    let result = build(&[boxed(FnModule("orphan", |registry: &mut CapabilityRegistry| {
        registry.bind::<Welcome>().to::<Welcome, _>(|r| {
            Ok(Arc::new(Welcome {
                greeter: r.get::<dyn Greeter>()?,
            }))
        });
    }))]);

    let err = result.err().expect("build should fail");
    let rendered = error_chain(&err);
    assert!(matches!(
        err,
        AssemblyError::Configuration(ConfigurationError::Unsatisfied { .. })
    ));
    assert!(rendered.contains("Greeter"), "{rendered}");
    assert!(rendered.contains("Welcome"), "{rendered}");
}

#[test]
fn test_circular_dependency_is_reported_with_its_path() {
    struct Left;
    struct Right;

    let result = build(&[boxed(FnModule("cycle", |registry: &mut CapabilityRegistry| {
        registry.bind::<Left>().to::<Left, _>(|r| {
            r.get::<Right>()?;
            Ok(Arc::new(Left))
        });
        registry.bind::<Right>().to::<Right, _>(|r| {
            r.get::<Left>()?;
            Ok(Arc::new(Right))
        });
    }))]);

    match result {
        Err(AssemblyError::Configuration(ConfigurationError::CircularDependency { path })) => {
            assert_eq!(path.len(), 3);
            assert_eq!(path.first(), path.last());
        }
        other => panic!("expected circular dependency, got {other:?}"),
    }
}

#[test]
fn test_factory_failure_aborts_build_with_construction_error() {
    let result = build(&[boxed(FnModule("failing", |registry: &mut CapabilityRegistry| {
        registry.bind::<dyn Greeter>().to::<English, _>(|_| {
            Err(Error::internal("greeter unavailable").into())
        });
    }))]);

    match result {
        Err(AssemblyError::Construction { key, source }) => {
            assert_eq!(key, CapabilityKey::of::<dyn Greeter>());
            assert!(source.to_string().contains("greeter unavailable"));
        }
        other => panic!("expected construction error, got {other:?}"),
    }
}

#[test]
fn test_domain_error_inside_factory_is_attributed_to_capability() {
    let result = build(&[boxed(FnModule("failing", |registry: &mut CapabilityRegistry| {
        registry.bind::<dyn Greeter>().to::<English, _>(|_| {
            let value: u32 = "not a number"
                .parse()
                .map_err(|_| Error::invalid_argument("bad greeting count"))?;
            let _ = value;
            let greeter: Arc<dyn Greeter> = Arc::new(English);
            Ok(greeter)
        });
    }))]);

    let err = result.err().expect("build should fail");
    let rendered = error_chain(&err);
    assert!(rendered.contains("failed to construct"), "{rendered}");
    assert!(rendered.contains("Greeter"), "{rendered}");
    assert!(rendered.contains("bad greeting count"), "{rendered}");
}

#[test]
fn test_duplicate_mount_prefix_fails_build() {
    let result = build(&[boxed(FnModule("mounts", |registry: &mut CapabilityRegistry| {
        registry.bind::<dyn Greeter>().to_instance(Arc::new(English));
        for _ in 0..2 {
            registry.mount(MountPoint::new(
                "/REST",
                CapabilityKey::of::<dyn Greeter>(),
                BTreeMap::new(),
            ));
        }
    }))]);

    assert!(matches!(
        result,
        Err(AssemblyError::Configuration(ConfigurationError::DuplicateMount { ref prefix })) if prefix == "/REST"
    ));
}

#[test]
fn test_mount_with_unbound_dispatcher_fails_build() {
    let result = build(&[boxed(FnModule("mounts", |registry: &mut CapabilityRegistry| {
        registry.mount(MountPoint::new(
            "/REST",
            CapabilityKey::of::<dyn Greeter>(),
            BTreeMap::new(),
        ));
    }))]);

    assert!(matches!(
        result,
        Err(AssemblyError::Configuration(ConfigurationError::Unsatisfied { .. }))
    ));
}

#[test]
fn test_container_exposes_mount_points_in_declaration_order() {
    let container = ContainerBuilder::new()
        .with_module(FnModule("mounts", |registry: &mut CapabilityRegistry| {
            registry.bind::<dyn Greeter>().to_instance(Arc::new(English));
            registry.mount(MountPoint::new(
                "/REST",
                CapabilityKey::of::<dyn Greeter>(),
                BTreeMap::new(),
            ));
            registry.mount(MountPoint::new(
                "/admin",
                CapabilityKey::of::<dyn Greeter>(),
                BTreeMap::new(),
            ));
        }))
        .build()
        .unwrap();

    let prefixes: Vec<&str> = container.mount_points().iter().map(MountPoint::prefix).collect();
    assert_eq!(prefixes, ["/REST", "/admin"]);
}

#[test]
fn test_container_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync + Clone>() {}
    assert_send_sync::<shepherd_infrastructure::di::Container>();

    let container = build(&[boxed(greeter_module("greeters"))]).unwrap();
    let shared = container.clone();
    let greeting = std::thread::spawn(move || shared.get::<dyn Greeter>().unwrap().greet())
        .join()
        .unwrap();

    assert_eq!(greeting, "hello");
    assert!(container.contains::<dyn Greeter>());
    assert!(!container.contains_named::<dyn Greeter>("fr"));
}
