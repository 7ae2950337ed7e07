//! Bootstrap of the full sidecar module set

use std::sync::Arc;

use rocket::http::Status;
use rocket::local::asynchronous::Client;
use shepherd_domain::ports::{JobScheduler, SchedulerFactory, ServerHandle};
use shepherd_infrastructure::config::AppConfig;
use shepherd_infrastructure::di::{StartupErrorKind, bootstrap};
use shepherd_server::rest::rest_rocket;
use shepherd_server::{DispatcherConfig, RestDispatcher, SidecarServer, shutdown, sidecar_modules};

use crate::test_utils::{assembled, test_config};

#[tokio::test]
async fn test_bootstrap_mounts_default_rest_prefix() {
    let container = bootstrap(&sidecar_modules(&Arc::new(test_config()))).unwrap();

    let prefixes: Vec<&str> = container
        .mount_points()
        .iter()
        .map(|mount| mount.prefix())
        .collect();
    assert_eq!(prefixes, ["/REST"]);
    assert!(container.get::<dyn ServerHandle>().is_ok());
    assert!(container.get::<SidecarServer>().unwrap().is_initialized());

    let dispatcher = container.get_named::<RestDispatcher>("/REST").unwrap();
    assert_eq!(dispatcher.resource_names(), ["cluster", "status"]);

    shutdown(&container);
}

#[rocket::async_test]
async fn test_configured_prefix_and_filter_context() {
    let mut config = test_config();
    config.server.rest.prefix = "/sidecar".to_string();
    config.server.rest.filter_context_path = Some("/sidecar/ctx".to_string());

    let container = bootstrap(&sidecar_modules(&Arc::new(config))).unwrap();

    let mount = &container.mount_points()[0];
    assert_eq!(mount.prefix(), "/sidecar");
    let dispatcher = container.get_named::<RestDispatcher>("/sidecar").unwrap();
    assert_eq!(
        dispatcher.config(),
        &DispatcherConfig::from_params(mount.params())
    );
    assert_eq!(dispatcher.config().filter_context_path(), Some("sidecar/ctx"));

    let client = Client::tracked(rest_rocket(&container).unwrap())
        .await
        .expect("valid rocket instance");
    let status = client.get("/sidecar/ctx/v1/status").dispatch().await.status();
    assert_eq!(status, Status::Ok);
    let status = client.get("/sidecar/v1/status").dispatch().await.status();
    assert_eq!(status, Status::NotFound);

    shutdown(&container);
}

#[rocket::async_test]
async fn test_filter_context_path_equal_to_prefix_serves_resources() {
    let mut config = test_config();
    config.server.rest.prefix = "/REST".to_string();
    config.server.rest.filter_context_path = Some("/REST".to_string());

    let container = bootstrap(&sidecar_modules(&Arc::new(config))).unwrap();
    let client = Client::tracked(rest_rocket(&container).unwrap())
        .await
        .expect("valid rocket instance");

    let response = client.get("/REST/v1/status").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let response = client.get("/REST/REST/v1/status").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);

    shutdown(&container);
}

#[test]
fn test_rocket_builds_before_start() {
    let container = assembled(test_config());

    assert!(rest_rocket(&container).is_ok());
    assert!(!container.get::<SidecarServer>().unwrap().is_initialized());
}

#[test]
fn test_bootstrap_without_runtime_is_initialization_failure() {
    let err = bootstrap(&sidecar_modules(&Arc::new(test_config())))
        .err()
        .expect("scheduler needs a tokio runtime");

    assert_eq!(err.kind(), StartupErrorKind::Initialization);
}

#[tokio::test]
async fn test_shutdown_stops_scheduler() {
    let container = bootstrap(&sidecar_modules(&Arc::new(test_config()))).unwrap();
    let scheduler = container
        .get::<dyn SchedulerFactory>()
        .unwrap()
        .scheduler()
        .unwrap();
    assert!(scheduler.is_started());

    shutdown(&container);

    assert!(!scheduler.is_started());
}

#[test]
fn test_default_config_assembles() {
    let container = assembled(AppConfig::default());

    assert_eq!(container.mount_points().len(), 1);
    assert!(container.contains::<SidecarServer>());
}
