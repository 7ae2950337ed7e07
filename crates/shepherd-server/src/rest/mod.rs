//! REST Front End
//!
//! A mount binds a URL prefix to a [`RestDispatcher`]; the dispatcher serves
//! every path below the prefix through the resources found in the scanned
//! packages.
//!
//! ```text
//! GET /REST/v1/cluster/peers
//!      │     └──────────────┐
//!   mount prefix      RestDispatcher ── longest base path ──► ClusterResource (path "peers")
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Dispatcher parameter bag |
//! | [`resource`] | Resource trait, request and response types |
//! | [`registry`] | Link-time resource registry and package scan |
//! | [`dispatcher`] | Per-mount request routing |
//! | [`route`] | Rocket handler and mounting |
//! | [`module`] | Bindings for mounts and scanned resources |
//! | [`resources`] | Built-in resources |

pub mod config;
pub mod dispatcher;
pub mod module;
pub mod registry;
pub mod resource;
pub mod resources;
pub mod route;

pub use config::DispatcherConfig;
pub use dispatcher::RestDispatcher;
pub use module::RestModule;
pub use registry::{
    REST_RESOURCES, RestResourceEntry, RestResourceFactory, list_rest_resources,
    package_matches, scan_rest_resources,
};
pub use resource::{RestMethod, RestRequest, RestResource, RestResponse};
pub use route::{MountHandler, mount_rest, rest_rocket};
