//! Instance Identity Tests

use shepherd_domain::ports::InstanceIdentityFactory;
use shepherd_domain::value_objects::NodeDescriptor;
use shepherd_infrastructure::infrastructure::InMemoryInstanceFactory;

fn node(app: &str, instance_id: &str) -> NodeDescriptor {
    NodeDescriptor {
        app: app.to_string(),
        instance_id: instance_id.to_string(),
        hostname: format!("{instance_id}.internal"),
        host_ip: "10.0.0.1".to_string(),
        rack: "rack-a".to_string(),
    }
}

#[test]
fn test_register_and_find() {
    let factory = InMemoryInstanceFactory::new();
    let identity = factory.register(node("orders", "i-1")).unwrap();

    assert_eq!(identity.app(), "orders");
    assert_eq!(factory.find("orders", "i-1").unwrap(), Some(identity));
    assert_eq!(factory.find("billing", "i-1").unwrap(), None);
}

#[test]
fn test_reregistration_replaces_record() {
    let factory = InMemoryInstanceFactory::new();
    factory.register(node("orders", "i-1")).unwrap();
    let mut moved = node("orders", "i-1");
    moved.rack = "rack-b".to_string();
    factory.register(moved).unwrap();

    assert_eq!(factory.len(), 1);
    let found = factory.find("orders", "i-1").unwrap().unwrap();
    assert_eq!(found.node.rack, "rack-b");
}

#[test]
fn test_instances_are_scoped_by_app_and_sorted() {
    let factory = InMemoryInstanceFactory::new();
    factory.register(node("orders", "i-3")).unwrap();
    factory.register(node("orders", "i-1")).unwrap();
    factory.register(node("billing", "i-2")).unwrap();

    let ids: Vec<String> = factory
        .instances("orders")
        .unwrap()
        .iter()
        .map(|identity| identity.instance_id().to_string())
        .collect();
    assert_eq!(ids, ["i-1", "i-3"]);
}

#[test]
fn test_deregister() {
    let factory = InMemoryInstanceFactory::new();
    factory.register(node("orders", "i-1")).unwrap();

    assert!(factory.deregister("orders", "i-1").unwrap());
    assert!(!factory.deregister("orders", "i-1").unwrap());
    assert!(factory.is_empty());
}

#[test]
fn test_register_rejects_blank_identifiers() {
    let factory = InMemoryInstanceFactory::new();

    assert!(factory.register(node("", "i-1")).is_err());
    assert!(factory.register(node("orders", " ")).is_err());
}
