//! Rocket wiring for REST mounts
//!
//! Each mount point becomes one wildcard route, `<prefix>/<path..>`,
//! registered for every method in [`ROUTED_METHODS`] and handled by the
//! mount's [`RestDispatcher`]. Methods no [`RestMethod`] covers answer with a
//! JSON `405`.
//!
//! `HEAD` is left to Rocket, which answers it through the `GET` route.
//! `CONNECT` targets an authority, never a path, so it is not routed.

use std::sync::Arc;

use rocket::data::{Data, ToByteUnit};
use rocket::http::{Method, Status};
use rocket::route::{Handler, Outcome, Route};
use rocket::{Build, Request, Rocket};
use shepherd_domain::error::Result;
use shepherd_infrastructure::di::Container;
use tracing::{info, warn};

use super::dispatcher::RestDispatcher;
use super::resource::{RestMethod, RestRequest, RestResponse};
use crate::constants::REST_BODY_LIMIT_MIB;

/// Wildcard path matching everything below a mount prefix
pub const MOUNT_WILDCARD: &str = "/<path..>";

/// Methods the wildcard route is registered for
pub const ROUTED_METHODS: [Method; 7] = [
    Method::Get,
    Method::Post,
    Method::Put,
    Method::Delete,
    Method::Patch,
    Method::Options,
    Method::Trace,
];

/// Rocket handler delegating to a dispatcher
#[derive(Clone)]
pub struct MountHandler {
    dispatcher: Arc<RestDispatcher>,
}

impl MountHandler {
    /// Handler for `dispatcher`
    pub fn new(dispatcher: Arc<RestDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// The wildcard route for every routed method
    pub fn routes(&self) -> Vec<Route> {
        ROUTED_METHODS
            .into_iter()
            .map(|method| Route::new(method, MOUNT_WILDCARD, self.clone()))
            .collect()
    }
}

#[rocket::async_trait]
impl Handler for MountHandler {
    async fn handle<'r>(&self, request: &'r Request<'_>, data: Data<'r>) -> Outcome<'r> {
        let Some(method) = RestMethod::from_rocket(request.method()) else {
            return Outcome::from(
                request,
                RestResponse::error(
                    Status::MethodNotAllowed,
                    format!(
                        "{} is not supported by {}",
                        request.method(),
                        request.uri().path()
                    ),
                ),
            );
        };

        let limit = request
            .limits()
            .get("json")
            .unwrap_or_else(|| REST_BODY_LIMIT_MIB.mebibytes());
        let body = match data.open(limit).into_bytes().await {
            Ok(bytes) => bytes.into_inner(),
            Err(err) => {
                warn!(error = %err, "Failed to read request body");
                return Outcome::from(
                    request,
                    RestResponse::error(Status::BadRequest, "unreadable request body"),
                );
            }
        };

        let path = request.routed_segments(0..).collect::<Vec<_>>().join("/");
        let rest_request = RestRequest {
            method,
            path,
            query: request.uri().query().map(|query| query.as_str().to_string()),
            body,
        };
        Outcome::from(request, self.dispatcher.dispatch(rest_request).await)
    }
}

/// Mount every mount point of `container` on `rocket`
///
/// # Errors
///
/// When a mount's dispatcher cannot be resolved as a [`RestDispatcher`].
pub fn mount_rest(mut rocket: Rocket<Build>, container: &Container) -> Result<Rocket<Build>> {
    for mount in container.mount_points() {
        let dispatcher = container.get_keyed::<RestDispatcher>(mount.dispatcher())?;
        let handler = MountHandler::new(dispatcher);
        info!(
            route = %mount.route_pattern(),
            resources = ?handler.dispatcher.resource_names(),
            "REST prefix mounted"
        );
        rocket = rocket.mount(mount.prefix(), handler.routes());
    }
    Ok(rocket)
}

/// Rocket instance serving every mount of `container`
///
/// # Errors
///
/// See [`mount_rest`].
pub fn rest_rocket(container: &Container) -> Result<Rocket<Build>> {
    mount_rest(rocket::build(), container)
}
