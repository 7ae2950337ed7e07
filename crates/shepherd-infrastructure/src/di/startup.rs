//! Startup Sequencer
//!
//! Resolves the [`ServerHandle`] from an assembled container and initializes
//! it exactly once on the calling thread. Failures are logged with their full
//! cause chain and returned as a single fatal [`StartupError`]; there is no
//! retry and no degraded mode.

use shepherd_domain::ports::ServerHandle;
use tracing::{error, info};

use super::assembler::build;
use super::container::Container;
use super::error::StartupError;
use super::module::Module;
use crate::error_ext::error_chain;

/// Resolve the server handle and run its initialization
///
/// # Errors
///
/// [`StartupError::ServerUnresolvable`] when the handle cannot be resolved,
/// [`StartupError::Initialization`] when `initialize()` fails.
pub fn start(container: &Container) -> Result<(), StartupError> {
    let server = container.get::<dyn ServerHandle>().map_err(|err| {
        let err = StartupError::ServerUnresolvable(err);
        error!(error = %error_chain(&err), "Server handle could not be resolved");
        err
    })?;

    info!("Initializing server");
    server.initialize().map_err(|err| {
        let err = StartupError::Initialization(err);
        error!(error = %error_chain(&err), "Server initialization failed");
        err
    })?;

    info!("Server initialized");
    Ok(())
}

/// Assemble `modules` and start the resulting container
///
/// # Errors
///
/// Any assembly or startup failure, see [`build`] and [`start`].
pub fn bootstrap(modules: &[Box<dyn Module>]) -> Result<Container, StartupError> {
    let container = build(modules)?;
    start(&container)?;
    Ok(container)
}
