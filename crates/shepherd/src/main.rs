//! Shepherd - Entry Point
//!
//! Binary entry point for the Shepherd sidecar. Lives in the `shepherd`
//! facade crate next to the library re-exports.

use clap::Parser;
use shepherd::run_server;

/// Command line interface for the Shepherd sidecar
#[derive(Parser, Debug)]
#[command(name = "shepherd")]
#[command(about = "Shepherd - cluster node sidecar")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run_server(cli.config.as_deref()).await
}
