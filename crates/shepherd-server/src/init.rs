//! Server Initialization
//!
//! Loads the configuration, installs logging, assembles and starts the
//! container, then serves the REST mounts with Rocket until shutdown.
//!
//! Assembly and initialization run synchronously before Rocket is launched;
//! any failure there ends the process with an error before a request is
//! served.

use std::path::Path;
use std::sync::Arc;

use shepherd_infrastructure::config::{AppConfig, ConfigLoader};
use shepherd_infrastructure::di::modules::SidecarModule;
use shepherd_infrastructure::di::{Container, Module, bootstrap};
use shepherd_infrastructure::logging::init_logging;
use tracing::{info, warn};

use crate::module::ServerModule;
use crate::rest::{RestModule, rest_rocket};
use crate::server::SidecarServer;

/// Modules composing the sidecar for `config`
pub fn sidecar_modules(config: &Arc<AppConfig>) -> Vec<Box<dyn Module>> {
    vec![
        Box::new(SidecarModule::new(Arc::clone(config))),
        Box::new(ServerModule),
        Box::new(RestModule::from_config(&config.server.rest)),
    ]
}

/// Run the Shepherd sidecar
///
/// Returns once Rocket shuts down; the scheduler is stopped before
/// returning.
pub async fn run_server(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    init_logging(&config.logging)?;

    info!(
        app = %config.cluster.app_name,
        host = %config.server.host,
        port = config.server.port,
        rest_prefix = %config.server.rest.prefix,
        "Starting Shepherd sidecar"
    );

    let config = Arc::new(config);
    let container = bootstrap(&sidecar_modules(&config))?;

    let figment = rocket::Config::figment()
        .merge(("address", config.server.host.clone()))
        .merge(("port", config.server.port));
    let rocket = rest_rocket(&container)?.configure(figment);

    let served = rocket.launch().await;
    shutdown(&container);
    served?;
    Ok(())
}

/// Load configuration from optional path
fn load_config(config_path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}

/// Stop background work owned by the container
pub fn shutdown(container: &Container) {
    match container.get::<SidecarServer>() {
        Ok(server) => server.shutdown(),
        Err(err) => warn!(error = %err, "Sidecar server unavailable at shutdown"),
    }
    info!("Shepherd sidecar stopped");
}
