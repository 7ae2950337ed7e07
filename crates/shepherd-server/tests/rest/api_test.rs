//! REST API tests against a started sidecar
//!
//! Requests go through Rocket's local client, the mount's wildcard route and
//! the dispatcher down to the builtin resources.

use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use shepherd_server::rest::rest_rocket;
use shepherd_server::{SidecarServer, shutdown};

use crate::test_utils::{backup_config, eventually, started, test_config};

async fn json_body(response: rocket::local::asynchronous::LocalResponse<'_>) -> serde_json::Value {
    let body = response.into_string().await.expect("response body");
    serde_json::from_str(&body).unwrap()
}

#[rocket::async_test]
async fn test_status_endpoint_reports_initialized_server() {
    let container = started(test_config());
    let client = Client::tracked(rest_rocket(&container).unwrap())
        .await
        .expect("valid rocket instance");

    let response = client.get("/REST/v1/status").dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::JSON));
    let json = json_body(response).await;
    assert_eq!(json["app"], "orders");
    assert_eq!(json["instance_id"], "orders-1");
    assert_eq!(json["initialized"], true);
    assert_eq!(json["server"]["backup_enabled"], false);
    assert_eq!(json["server"]["jobs"], serde_json::json!(["host-refresh"]));

    shutdown(&container);
}

#[rocket::async_test]
async fn test_status_endpoint_shows_registered_repository() {
    let container = started(backup_config());
    let client = Client::tracked(rest_rocket(&container).unwrap())
        .await
        .expect("valid rocket instance");

    let json = json_body(client.get("/REST/v1/status").dispatch().await).await;

    assert_eq!(json["server"]["backup_enabled"], true);
    assert_eq!(json["server"]["repository"]["name"], "orders-repo");
    assert_eq!(json["server"]["repository"]["repository_type"], "s3");

    shutdown(&container);
}

#[rocket::async_test]
async fn test_cluster_peers_after_refresh() {
    let container = started(test_config());
    let server = container.get::<SidecarServer>().unwrap();
    assert!(eventually(|| server.peers().len() == 2).await);

    let client = Client::tracked(rest_rocket(&container).unwrap())
        .await
        .expect("valid rocket instance");

    let response = client.get("/REST/v1/cluster/peers").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let json = json_body(response).await;
    let hostnames: Vec<&str> = json["hosts"]
        .as_array()
        .expect("hosts array")
        .iter()
        .filter_map(|host| host["hostname"].as_str())
        .collect();
    assert_eq!(hostnames, ["peer-a", "peer-b"]);
    assert!(json["refreshed_at"].is_string());

    let summary = json_body(client.get("/REST/v1/cluster").dispatch().await).await;
    assert_eq!(summary["peers"], 2);

    let instances = json_body(client.get("/REST/v1/cluster/instances").dispatch().await).await;
    assert_eq!(instances[0]["instance_id"], "orders-1");

    shutdown(&container);
}

#[rocket::async_test]
async fn test_unsupported_method_is_rejected() {
    let container = started(test_config());
    let client = Client::tracked(rest_rocket(&container).unwrap())
        .await
        .expect("valid rocket instance");

    let response = client
        .post("/REST/v1/status")
        .header(ContentType::JSON)
        .body("{}")
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::MethodNotAllowed);
    let json = json_body(response).await;
    assert!(json["error"].is_string());

    shutdown(&container);
}

#[rocket::async_test]
async fn test_methods_without_rest_mapping_are_rejected_as_json() {
    let container = started(test_config());
    let client = Client::tracked(rest_rocket(&container).unwrap())
        .await
        .expect("valid rocket instance");

    for response in [
        client.patch("/REST/v1/status").dispatch().await,
        client.options("/REST/v1/status").dispatch().await,
    ] {
        assert_eq!(response.status(), Status::MethodNotAllowed);
        assert_eq!(response.content_type(), Some(ContentType::JSON));
        let json = json_body(response).await;
        assert!(
            json["error"]
                .as_str()
                .is_some_and(|message| message.contains("/REST/v1/status"))
        );
    }

    let response = client.head("/REST/v1/status").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    shutdown(&container);
}

#[rocket::async_test]
async fn test_unknown_resource_is_not_found() {
    let container = started(test_config());
    let client = Client::tracked(rest_rocket(&container).unwrap())
        .await
        .expect("valid rocket instance");

    let response = client.get("/REST/unknown").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);

    let response = client.get("/REST/v1/status/extra").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);

    shutdown(&container);
}

#[rocket::async_test]
async fn test_paths_outside_the_mount_are_not_routed() {
    let container = started(test_config());
    let client = Client::tracked(rest_rocket(&container).unwrap())
        .await
        .expect("valid rocket instance");

    let response = client.get("/v1/status").dispatch().await;

    assert_eq!(response.status(), Status::NotFound);

    shutdown(&container);
}
