//! REST Dispatcher Tests

use std::sync::Arc;

use async_trait::async_trait;
use rocket::http::Status;
use serde_json::json;
use shepherd_domain::error::{Error, Result};
use shepherd_infrastructure::di::modules::SidecarModule;
use shepherd_infrastructure::di::{
    AssemblyError, CapabilityKey, ConfigurationError, Container, Module, ResolveError, Resolver,
    Scope, build,
};
use shepherd_server::ServerModule;
use shepherd_server::constants::REST_RESOURCE_PACKAGES_PARAM;
use shepherd_server::rest::{
    DispatcherConfig, REST_RESOURCES, RestDispatcher, RestMethod, RestModule, RestRequest,
    RestResource, RestResourceEntry, RestResponse,
};

use crate::test_utils::{assembled, test_config};

/// Echoes the method, remaining path and body back
struct Echo {
    label: &'static str,
}

#[async_trait]
impl RestResource for Echo {
    fn methods(&self) -> &[RestMethod] {
        &[RestMethod::Get, RestMethod::Post]
    }

    async fn handle(&self, request: RestRequest) -> Result<RestResponse> {
        if request.path == "fail" {
            return Err(Error::internal("echo broke"));
        }
        RestResponse::ok(&json!({
            "resource": self.label,
            "method": format!("{:?}", request.method),
            "path": request.path,
            "body": String::from_utf8_lossy(&request.body),
        }))
    }
}

fn echo_factory(_: &Resolver<'_>) -> std::result::Result<Arc<dyn RestResource>, ResolveError> {
    Ok(Arc::new(Echo { label: "echo" }))
}

fn deep_echo_factory(
    _: &Resolver<'_>,
) -> std::result::Result<Arc<dyn RestResource>, ResolveError> {
    Ok(Arc::new(Echo { label: "deep" }))
}

#[linkme::distributed_slice(REST_RESOURCES)]
static ECHO_RESOURCE: RestResourceEntry = RestResourceEntry {
    package: "tests.echo",
    name: "echo",
    description: "Echoes requests",
    base_path: "echo",
    scope: Scope::Transient,
    factory: echo_factory,
};

#[linkme::distributed_slice(REST_RESOURCES)]
static DEEP_ECHO_RESOURCE: RestResourceEntry = RestResourceEntry {
    package: "tests.echo.deep",
    name: "deep-echo",
    description: "Echoes requests below echo/deep",
    base_path: "/echo/deep/",
    scope: Scope::Singleton,
    factory: deep_echo_factory,
};

fn echo_container(config: DispatcherConfig) -> Container {
    let modules: Vec<Box<dyn Module>> =
        vec![Box::new(RestModule::new().mount("/api/", config))];
    build(&modules).expect("echo mount should assemble")
}

fn dispatcher(container: &Container, prefix: &str) -> Arc<RestDispatcher> {
    container
        .get_named::<RestDispatcher>(prefix)
        .expect("dispatcher bound under its prefix")
}

async fn get(dispatcher: &RestDispatcher, path: &str) -> RestResponse {
    dispatcher
        .dispatch(RestRequest::new(RestMethod::Get, path))
        .await
}

#[tokio::test]
async fn test_longest_base_path_wins() {
    let container = echo_container(DispatcherConfig::new().with_resource_package("tests.echo"));
    let dispatcher = dispatcher(&container, "/api");

    let shallow = get(&dispatcher, "echo/deeper").await;
    let deep = get(&dispatcher, "/echo/deep/item/").await;

    assert_eq!(shallow.status, Status::Ok);
    assert_eq!(shallow.body["resource"], "echo");
    assert_eq!(shallow.body["path"], "deeper");
    assert_eq!(deep.body["resource"], "deep");
    assert_eq!(deep.body["path"], "item");
    assert_eq!(dispatcher.resource_names(), ["deep-echo", "echo"]);
}

#[tokio::test]
async fn test_request_body_reaches_resource() {
    let container = echo_container(DispatcherConfig::new().with_resource_package("tests.echo"));
    let request = RestRequest::new(RestMethod::Post, "echo").with_body("ping");

    let response = dispatcher(&container, "/api").dispatch(request).await;

    assert_eq!(response.body["method"], "Post");
    assert_eq!(response.body["body"], "ping");
}

#[tokio::test]
async fn test_unmatched_path_is_not_found() {
    let container = echo_container(DispatcherConfig::new().with_resource_package("tests.echo"));
    let dispatcher = dispatcher(&container, "/api");

    assert_eq!(get(&dispatcher, "echoes").await.status, Status::NotFound);
    assert_eq!(get(&dispatcher, "").await.status, Status::NotFound);
}

#[tokio::test]
async fn test_unsupported_method_is_not_allowed() {
    let container = echo_container(DispatcherConfig::new().with_resource_package("tests.echo"));

    let response = dispatcher(&container, "/api")
        .dispatch(RestRequest::new(RestMethod::Delete, "echo"))
        .await;

    assert_eq!(response.status, Status::MethodNotAllowed);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_resource_error_is_internal_server_error() {
    let container = echo_container(DispatcherConfig::new().with_resource_package("tests.echo"));

    let response = get(&dispatcher(&container, "/api"), "echo/fail").await;

    assert_eq!(response.status, Status::InternalServerError);
    assert!(
        response.body["error"]
            .as_str()
            .is_some_and(|message| message.contains("echo broke"))
    );
}

#[tokio::test]
async fn test_filter_context_path_is_stripped_from_full_path() {
    let container = echo_container(
        DispatcherConfig::new()
            .with_resource_package("tests.echo")
            .with_filter_context_path("/api/ctx/"),
    );
    let dispatcher = dispatcher(&container, "/api");

    let response = get(&dispatcher, "ctx/echo/item").await;
    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.body["path"], "item");

    assert_eq!(get(&dispatcher, "echo").await.status, Status::NotFound);
    assert_eq!(get(&dispatcher, "ctxecho").await.status, Status::NotFound);
}

#[tokio::test]
async fn test_filter_context_path_equal_to_prefix_is_a_no_op() {
    let container = echo_container(
        DispatcherConfig::new()
            .with_resource_package("tests.echo")
            .with_filter_context_path("/api"),
    );
    let dispatcher = dispatcher(&container, "/api");

    assert_eq!(get(&dispatcher, "echo").await.status, Status::Ok);
    assert_eq!(get(&dispatcher, "api/echo").await.status, Status::NotFound);
}

#[tokio::test]
async fn test_filter_context_path_outside_prefix_matches_nothing() {
    let container = echo_container(
        DispatcherConfig::new()
            .with_resource_package("tests.echo")
            .with_filter_context_path("ctx"),
    );
    let dispatcher = dispatcher(&container, "/api");

    let response = get(&dispatcher, "ctx/echo").await;
    assert_eq!(response.status, Status::NotFound);
    assert!(
        response.body["error"]
            .as_str()
            .is_some_and(|message| message.contains("api/ctx/echo"))
    );
}

#[tokio::test]
async fn test_sub_packages_are_scanned_only_from_their_root() {
    let container =
        echo_container(DispatcherConfig::new().with_resource_package("tests.echo.deep"));
    let dispatcher = dispatcher(&container, "/api");

    assert_eq!(dispatcher.resource_names(), ["deep-echo"]);
    assert_eq!(get(&dispatcher, "echo").await.status, Status::NotFound);
}

#[test]
fn test_resources_follow_their_registered_scope() {
    let container = echo_container(DispatcherConfig::new().with_resource_package("tests.echo"));

    let first = container.get_named::<dyn RestResource>("echo").unwrap();
    let second = container.get_named::<dyn RestResource>("echo").unwrap();
    assert!(!Arc::ptr_eq(&first, &second));

    let first = container.get_named::<dyn RestResource>("deep-echo").unwrap();
    let second = container.get_named::<dyn RestResource>("deep-echo").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_mount_point_carries_parameter_bag() {
    let container = echo_container(
        DispatcherConfig::new()
            .with_resource_package("tests.echo")
            .with_param("custom", "kept"),
    );

    let mount = &container.mount_points()[0];
    assert_eq!(mount.prefix(), "/api");
    assert_eq!(mount.route_pattern(), "/api/*");
    assert_eq!(mount.param(REST_RESOURCE_PACKAGES_PARAM), Some("tests.echo"));
    assert_eq!(mount.param("custom"), Some("kept"));
    assert_eq!(
        mount.dispatcher(),
        &CapabilityKey::named::<RestDispatcher>("/api")
    );

    let binding = container.binding(mount.dispatcher()).unwrap();
    assert_eq!(binding.scope(), Scope::Singleton);
    assert_eq!(binding.module(), "rest");
}

#[test]
fn test_builtin_resources_need_server_collaborators() {
    let modules: Vec<Box<dyn Module>> = vec![Box::new(
        RestModule::new().mount("/REST", DispatcherConfig::new().with_resource_package("shepherd")),
    )];

    match build(&modules) {
        Err(AssemblyError::Configuration(ConfigurationError::Unsatisfied { required_by, .. })) => {
            assert!(
                required_by
                    .as_deref()
                    .is_some_and(|requester| requester.contains("RestResource")),
                "{required_by:?}"
            );
        }
        other => panic!("expected unsatisfied dependency, got {other:?}"),
    }
}

#[tokio::test]
async fn test_builtin_status_before_initialization() {
    let container = assembled(test_config());

    let response = get(&dispatcher(&container, "/REST"), "v1/status").await;

    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.body["app"], "orders");
    assert_eq!(response.body["initialized"], false);
    assert!(response.body["server"].is_null());
}

#[tokio::test]
async fn test_builtin_cluster_views() {
    let container = assembled(test_config());
    let dispatcher = dispatcher(&container, "/REST");

    let summary = get(&dispatcher, "v1/cluster").await;
    assert_eq!(summary.body["app"], "orders");
    assert_eq!(summary.body["rack"], "rack-a");
    assert_eq!(summary.body["peers"], 0);

    let peers = get(&dispatcher, "v1/cluster/peers").await;
    assert_eq!(peers.body["hosts"], json!([]));

    let instances = get(&dispatcher, "v1/cluster/instances").await;
    assert_eq!(instances.body, json!([]));

    assert_eq!(get(&dispatcher, "v1/cluster/racks").await.status, Status::NotFound);
}

#[test]
fn test_two_mounts_share_scanned_resources() {
    let config = Arc::new(test_config());
    let modules: Vec<Box<dyn Module>> = vec![
        Box::new(SidecarModule::new(Arc::clone(&config))),
        Box::new(ServerModule),
        Box::new(
            RestModule::new()
                .mount("/REST", DispatcherConfig::new().with_resource_package("shepherd.resources"))
                .mount("/admin", DispatcherConfig::new().with_resource_package("shepherd")),
        ),
    ];

    let container = build(&modules).expect("mounts should assemble");

    assert_eq!(container.mount_points().len(), 2);
    assert!(container.contains_named::<RestDispatcher>("/admin"));
    assert_eq!(
        dispatcher(&container, "/admin").resource_names(),
        dispatcher(&container, "/REST").resource_names()
    );
}
